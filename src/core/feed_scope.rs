use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{GroupId, UserId};

/// Which posts populate a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum FeedScope {
    /// Every post.
    Global,
    /// Posts filed into one group.
    Group(GroupId),
    /// Posts written by one author.
    Profile(UserId),
    /// Posts by the authors the given viewer follows.
    Followed(UserId),
}

impl FeedScope {
    /// Only the global feed is served from the page cache. Profile pages carry
    /// viewer-dependent follow state and the followed feed is per viewer.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, FeedScope::Global)
    }
}

impl fmt::Display for FeedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedScope::Global => write!(f, "global"),
            FeedScope::Group(id) => write!(f, "group:{}", id),
            FeedScope::Profile(id) => write!(f, "profile:{}", id),
            FeedScope::Followed(id) => write!(f, "followed:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_distinct_per_scope() {
        assert_eq!(FeedScope::Global.to_string(), "global");
        assert_eq!(FeedScope::Group(GroupId(2)).to_string(), "group:2");
        assert_ne!(
            FeedScope::Profile(UserId(2)).to_string(),
            FeedScope::Followed(UserId(2)).to_string()
        );
    }

    #[test]
    fn test_only_global_is_cacheable() {
        assert!(FeedScope::Global.is_cacheable());
        assert!(!FeedScope::Group(GroupId(1)).is_cacheable());
        assert!(!FeedScope::Profile(UserId(1)).is_cacheable());
        assert!(!FeedScope::Followed(UserId(1)).is_cacheable());
    }
}
