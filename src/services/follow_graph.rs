// Follow graph - directed "viewer wants to see target's posts" edges

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::{FollowRepository, UserRepository};
use crate::infrastructure::viewer::ViewerContext;
use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Created,
    AlreadyFollowing,
    /// Following yourself is ignored.
    SelfFollow,
}

#[derive(Clone)]
pub struct FollowGraph {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl FollowGraph {
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }

    /// Look up a user by username, failing with `NotFound`.
    pub async fn find_user(&self, username: &str) -> AppResult<User> {
        self.users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
    }

    #[instrument(skip(self))]
    pub async fn follow(&self, viewer: UserId, target: UserId) -> AppResult<FollowOutcome> {
        if viewer == target {
            return Ok(FollowOutcome::SelfFollow);
        }
        if self.follows.create_follow(viewer, target).await? {
            info!("User {} now follows {}", viewer, target);
            Ok(FollowOutcome::Created)
        } else {
            Ok(FollowOutcome::AlreadyFollowing)
        }
    }

    /// Remove an edge. Unlike `follow`, a missing edge is an error rather than a no-op.
    #[instrument(skip(self))]
    pub async fn unfollow(&self, viewer: UserId, target: UserId) -> AppResult<()> {
        if self.follows.delete_follow(viewer, target).await? {
            info!("User {} unfollowed {}", viewer, target);
            Ok(())
        } else {
            warn!("User {} tried to unfollow {} without following", viewer, target);
            Err(AppError::NotFound(format!(
                "User {} does not follow {}",
                viewer, target
            )))
        }
    }

    /// Anonymous viewers follow nobody; storage is not consulted for them.
    pub async fn is_following(&self, viewer: &ViewerContext, target: UserId) -> AppResult<bool> {
        match viewer.user_id() {
            Some(viewer_id) => self.follows.follow_exists(viewer_id, target).await,
            None => Ok(false),
        }
    }

    pub async fn follower_count(&self, author: UserId) -> AppResult<u64> {
        self.follows.count_followers(author).await
    }

    pub async fn following_count(&self, user: UserId) -> AppResult<u64> {
        self.follows.count_following(user).await
    }
}
