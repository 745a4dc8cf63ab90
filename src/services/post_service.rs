// Post service - create, view, edit and comment on posts

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::{PostId, UserId};
use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::{
    CommentRepository, GroupRepository, PostFilter, PostRepository, Store,
};
use crate::infrastructure::viewer::ViewerContext;
use crate::models::{
    Comment, CommentView, Group, NewComment, NewPost, Post, PostChanges, PostView, User,
};
use crate::services::follow_graph::FollowGraph;
use crate::services::forms::{CommentForm, PostForm};

/// Everything the post detail page shows.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: PostView,
    pub author: User,
    /// Total posts by the author.
    pub quantity: u64,
    pub comments: Vec<CommentView>,
    pub comments_count: usize,
    pub following: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAccess {
    Allowed(Post),
    /// The viewer is not the author; callers fall back to the read-only view.
    NotAuthor,
}

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
    follows: FollowGraph,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>, follows: FollowGraph) -> Self {
        Self { store, follows }
    }

    pub async fn list_groups(&self) -> AppResult<Vec<Group>> {
        self.store.list_groups().await
    }

    #[instrument(skip(self, author, form), fields(author = %author.username))]
    pub async fn create_post(&self, author: &User, form: &PostForm) -> AppResult<Post> {
        let cleaned = form.clean(self.store.as_ref()).await?;
        let post = self
            .store
            .create_post(NewPost {
                author_id: author.id,
                text: cleaned.text,
                group_id: cleaned.group_id,
                image: cleaned.image,
            })
            .await?;
        info!("Created post {}", post.id);
        Ok(post)
    }

    /// The post must belong to `username`; otherwise it is reported missing.
    pub async fn post_detail(
        &self,
        viewer: &ViewerContext,
        username: &str,
        post_id: PostId,
    ) -> AppResult<PostDetail> {
        let author = self.follows.find_user(username).await?;
        let post = self
            .store
            .get_post_view(post_id)
            .await?
            .filter(|post| post.author.id == author.id)
            .ok_or_else(|| post_not_found(post_id))?;

        let quantity = self.store.count_posts(PostFilter::ByAuthor(author.id)).await?;
        let comments = self.store.list_comments(post.id).await?;
        let following = self.follows.is_following(viewer, author.id).await?;

        Ok(PostDetail {
            comments_count: comments.len(),
            post,
            author,
            quantity,
            comments,
            following,
        })
    }

    /// Check whether the viewer may edit a post.
    pub async fn edit_access(&self, viewer: &ViewerContext, post_id: PostId) -> AppResult<EditAccess> {
        let post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))?;

        if is_author(viewer.user_id(), &post) {
            Ok(EditAccess::Allowed(post))
        } else {
            Ok(EditAccess::NotAuthor)
        }
    }

    #[instrument(skip(self, viewer, form))]
    pub async fn edit_post(
        &self,
        viewer: &ViewerContext,
        post_id: PostId,
        form: &PostForm,
    ) -> AppResult<EditAccess> {
        let post = match self.edit_access(viewer, post_id).await? {
            EditAccess::Allowed(post) => post,
            EditAccess::NotAuthor => {
                warn!(
                    "Viewer {:?} is not the author of post {}",
                    viewer.username(),
                    post_id
                );
                return Ok(EditAccess::NotAuthor);
            }
        };

        let cleaned = form.clean(self.store.as_ref()).await?;
        let updated = self
            .store
            .update_post(
                post.id,
                PostChanges {
                    image: cleaned.resolve_image(post.image),
                    text: cleaned.text,
                    group_id: cleaned.group_id,
                },
            )
            .await?;
        info!("Edited post {}", updated.id);
        Ok(EditAccess::Allowed(updated))
    }

    /// Add a comment. An invalid form is dropped and yields `None`.
    #[instrument(skip(self, author, form), fields(author = %author.username))]
    pub async fn add_comment(
        &self,
        author: &User,
        post_id: PostId,
        form: &CommentForm,
    ) -> AppResult<Option<Comment>> {
        let post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))?;

        let Some(text) = form.clean() else {
            return Ok(None);
        };
        let comment = self
            .store
            .create_comment(NewComment {
                post_id: post.id,
                author_id: author.id,
                text,
            })
            .await?;
        info!("Comment {} added to post {}", comment.id, post.id);
        Ok(Some(comment))
    }
}

fn is_author(viewer: Option<UserId>, post: &Post) -> bool {
    viewer == Some(post.author_id)
}

fn post_not_found(post_id: PostId) -> AppError {
    AppError::NotFound(format!("Post {} not found", post_id))
}
