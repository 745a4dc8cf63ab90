// Repository interfaces - one per entity, implemented by the SQLite store

use async_trait::async_trait;

use crate::core::{GroupId, PostId, UserId};
use crate::error::AppResult;
use crate::models::{
    Comment, CommentView, Group, NewComment, NewGroup, NewPost, NewUser, Post, PostChanges,
    PostView, User,
};

/// Row filter applied to the posts table for one feed scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    InGroup(GroupId),
    ByAuthor(UserId),
    /// Posts whose author is followed by the given user at query time.
    FollowedBy(UserId),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> AppResult<User>;
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn count_users(&self) -> AppResult<u64>;
}

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn create_group(&self, group: NewGroup) -> AppResult<Group>;
    async fn get_group(&self, id: GroupId) -> AppResult<Option<Group>>;
    async fn find_group_by_slug(&self, slug: &str) -> AppResult<Option<Group>>;
    async fn list_groups(&self) -> AppResult<Vec<Group>>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: NewPost) -> AppResult<Post>;
    async fn get_post(&self, id: PostId) -> AppResult<Option<Post>>;
    async fn get_post_view(&self, id: PostId) -> AppResult<Option<PostView>>;
    async fn update_post(&self, id: PostId, changes: PostChanges) -> AppResult<Post>;
    async fn count_posts(&self, filter: PostFilter) -> AppResult<u64>;
    /// Newest first, joined with author and group.
    async fn list_posts(&self, filter: PostFilter, limit: u64, offset: u64)
        -> AppResult<Vec<PostView>>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, comment: NewComment) -> AppResult<Comment>;
    /// Newest first.
    async fn list_comments(&self, post_id: PostId) -> AppResult<Vec<CommentView>>;
}

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Returns false when the edge already existed.
    async fn create_follow(&self, user_id: UserId, author_id: UserId) -> AppResult<bool>;
    /// Returns false when there was no edge to delete.
    async fn delete_follow(&self, user_id: UserId, author_id: UserId) -> AppResult<bool>;
    async fn follow_exists(&self, user_id: UserId, author_id: UserId) -> AppResult<bool>;
    async fn count_followers(&self, author_id: UserId) -> AppResult<u64>;
    async fn count_following(&self, user_id: UserId) -> AppResult<u64>;
}

/// Everything the services need from persistence.
pub trait Store:
    UserRepository + GroupRepository + PostRepository + CommentRepository + FollowRepository
{
}

impl<T> Store for T where
    T: UserRepository + GroupRepository + PostRepository + CommentRepository + FollowRepository
{
}
