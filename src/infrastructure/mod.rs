// Infrastructure - storage, caching and request-scoped viewer context
pub mod cache;           // Page cache for rendered feeds
pub mod middleware;      // Viewer context middleware and extractors
pub mod sqlite_database; // SQLite repositories
pub mod traits;          // Repository interfaces
pub mod viewer;          // Viewer context

pub use cache::{FeedCacheKey, PageCache};
pub use sqlite_database::SqliteStore;
pub use traits::{
    CommentRepository, FollowRepository, GroupRepository, PostFilter, PostRepository, Store,
    UserRepository,
};
pub use viewer::ViewerContext;
