use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    infrastructure::{PageCache, SqliteStore, Store},
    services::{FeedBuilder, FollowGraph, PostService},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub feeds: FeedBuilder,
    pub follows: FollowGraph,
    pub posts: PostService,
    pub page_cache: Arc<PageCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let store = Arc::new(SqliteStore::connect(&config.database.url).await?);
        Ok(Self::with_store(store, config))
    }

    /// Wire the services around an already opened store.
    pub fn with_store<S>(store: Arc<S>, config: Config) -> Self
    where
        S: Store + 'static,
    {
        let follows = FollowGraph::new(store.clone(), store.clone());
        let shared: Arc<dyn Store> = store;
        let page_cache = Arc::new(PageCache::new(config.cache.capacity, config.cache.ttl()));

        Self {
            feeds: FeedBuilder::new(shared.clone(), follows.clone()),
            posts: PostService::new(shared.clone(), follows.clone()),
            follows,
            store: shared,
            page_cache,
            config: Arc::new(config),
        }
    }
}
