// Feed builder - decides which posts a scope shows, newest first, ten per page

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::core::{FeedPage, FeedScope, PageRequest, Paginator};
use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::{GroupRepository, PostFilter, PostRepository, Store};
use crate::infrastructure::viewer::ViewerContext;
use crate::models::{Group, PostView, User};
use crate::services::follow_graph::FollowGraph;

impl From<FeedScope> for PostFilter {
    fn from(scope: FeedScope) -> Self {
        match scope {
            FeedScope::Global => PostFilter::All,
            FeedScope::Group(group_id) => PostFilter::InGroup(group_id),
            FeedScope::Profile(author_id) => PostFilter::ByAuthor(author_id),
            FeedScope::Followed(viewer_id) => PostFilter::FollowedBy(viewer_id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupFeed {
    pub group: Group,
    pub page: FeedPage<PostView>,
    /// Total posts in the group.
    pub quantity: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileFeed {
    pub author: User,
    pub page: FeedPage<PostView>,
    /// Total posts by the author.
    pub quantity: u64,
    pub following: bool,
    pub follower_count: u64,
    pub following_count: u64,
}

#[derive(Clone)]
pub struct FeedBuilder {
    store: Arc<dyn Store>,
    follows: FollowGraph,
}

impl FeedBuilder {
    pub fn new(store: Arc<dyn Store>, follows: FollowGraph) -> Self {
        Self { store, follows }
    }

    /// Build one page of a scope. An empty scope yields an empty first page.
    #[instrument(skip(self))]
    pub async fn build(&self, scope: FeedScope, page: PageRequest) -> AppResult<FeedPage<PostView>> {
        let filter = PostFilter::from(scope);
        let paginator = Paginator::new(self.store.count_posts(filter).await?);
        let window = paginator.window(page);

        let items = if paginator.count() == 0 {
            Vec::new()
        } else {
            self.store
                .list_posts(filter, window.limit, window.offset)
                .await?
        };
        debug!(
            "Built {} page {}/{} with {} posts",
            scope,
            window.number,
            paginator.num_pages(),
            items.len()
        );
        Ok(FeedPage::new(items, window, &paginator))
    }

    pub async fn global(&self, page: PageRequest) -> AppResult<FeedPage<PostView>> {
        self.build(FeedScope::Global, page).await
    }

    pub async fn group(&self, slug: &str, page: PageRequest) -> AppResult<GroupFeed> {
        let group = self
            .store
            .find_group_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group '{}' not found", slug)))?;

        let page = self.build(FeedScope::Group(group.id), page).await?;
        Ok(GroupFeed {
            quantity: page.count,
            group,
            page,
        })
    }

    pub async fn profile(
        &self,
        viewer: &ViewerContext,
        username: &str,
        page: PageRequest,
    ) -> AppResult<ProfileFeed> {
        let author = self.follows.find_user(username).await?;
        let page = self.build(FeedScope::Profile(author.id), page).await?;
        let following = self.follows.is_following(viewer, author.id).await?;
        let follower_count = self.follows.follower_count(author.id).await?;
        let following_count = self.follows.following_count(author.id).await?;

        Ok(ProfileFeed {
            quantity: page.count,
            author,
            page,
            following,
            follower_count,
            following_count,
        })
    }

    /// Posts by the authors the viewer follows. Requires an authenticated viewer.
    pub async fn followed(
        &self,
        viewer: &ViewerContext,
        page: PageRequest,
    ) -> AppResult<FeedPage<PostView>> {
        let viewer_id = viewer.user_id().ok_or_else(|| {
            AppError::Unauthorized("The followed feed requires a logged-in user".to_string())
        })?;
        self.build(FeedScope::Followed(viewer_id), page).await
    }
}
