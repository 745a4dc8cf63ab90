// Core types and primitives shared by the services

pub mod feed_scope;
pub mod pagination;
pub mod strong_types;

// Re-export commonly used types
pub use feed_scope::FeedScope;
pub use pagination::{FeedPage, PageRequest, PageWindow, Paginator, PAGE_SIZE};
pub use strong_types::{
    current_time_millis, millis_to_datetime, CommentId, GroupId, PostId, UserId,
};
