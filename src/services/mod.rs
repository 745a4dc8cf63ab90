// Services - feed composition, follow graph and post handling on top of the repositories

pub mod feed_builder;
pub mod follow_graph;
pub mod forms;
pub mod post_service;

pub use feed_builder::{FeedBuilder, GroupFeed, ProfileFeed};
pub use follow_graph::{FollowGraph, FollowOutcome};
pub use forms::{CleanedPost, CommentForm, PostForm};
pub use post_service::{EditAccess, PostDetail, PostService};
