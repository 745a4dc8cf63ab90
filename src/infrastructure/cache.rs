// Page cache - short-lived cache of rendered feed pages.
// Writes do not invalidate it; entries live until they expire or `clear` is called.

use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use crate::core::{FeedScope, PageRequest};

/// Cache key derived from the feed scope and the requested page number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedCacheKey(String);

impl FeedCacheKey {
    pub fn new(scope: &FeedScope, page: PageRequest) -> Self {
        Self(format!("feed:{}:page={}", scope, page.number()))
    }
}

impl fmt::Display for FeedCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

pub struct PageCache {
    inner: Mutex<LruCache<FeedCacheKey, CacheEntry>>,
    ttl: Duration,
}

impl fmt::Debug for PageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCache").field("ttl", &self.ttl).finish()
    }
}

impl PageCache {
    /// A zero `ttl` disables caching: every entry is expired on arrival.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub async fn get(&self, key: &FeedCacheKey) -> Option<String> {
        let mut inner = self.inner.lock().await;
        let expired = inner.peek(key).map(|entry| entry.is_expired(self.ttl));
        match expired {
            Some(false) => {
                debug!("page cache hit for {}", key);
                inner.get(key).map(|entry| entry.body.clone())
            }
            Some(true) => {
                debug!("page cache entry {} expired", key);
                inner.pop(key);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, key: FeedCacheKey, body: String) {
        if self.ttl.is_zero() {
            return;
        }
        let entry = CacheEntry {
            body,
            inserted_at: Instant::now(),
        };
        self.inner.lock().await.put(key, entry);
    }

    /// Drop every cached page.
    pub async fn clear(&self) {
        self.inner.lock().await.clear();
        debug!("page cache cleared");
    }
}
