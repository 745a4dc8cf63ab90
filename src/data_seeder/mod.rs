use tracing::info;

use crate::{
    core::UserId,
    error::AppResult,
    infrastructure::traits::{
        CommentRepository, FollowRepository, GroupRepository, PostRepository, Store,
        UserRepository,
    },
    models::{NewComment, NewGroup, NewPost, NewUser},
};

const DEMO_USERS: [(&str, &str, &str); 3] = [
    ("leo", "Leo", "Tolstoy"),
    ("anna", "Anna", "Akhmatova"),
    ("ivan", "Ivan", "Bunin"),
];

const DEMO_GROUPS: [(&str, &str, &str); 2] = [
    ("Cats", "cats", "Everything about cats"),
    ("Travel", "travel", "Notes from the road"),
];

/// Fill an empty store with demo users, groups, posts, comments and follows.
/// Returns `false` without touching anything when users already exist.
pub async fn seed_demo_data<S>(store: &S) -> AppResult<bool>
where
    S: Store + ?Sized,
{
    if store.count_users().await? > 0 {
        info!("Store already has users, skipping demo data");
        return Ok(false);
    }

    let mut users = Vec::with_capacity(DEMO_USERS.len());
    for (username, first_name, last_name) in DEMO_USERS {
        let user = store
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })
            .await?;
        users.push(user);
    }

    let mut groups = Vec::with_capacity(DEMO_GROUPS.len());
    for (title, slug, description) in DEMO_GROUPS {
        let group = store
            .create_group(NewGroup {
                title: title.to_string(),
                slug: slug.to_string(),
                description: description.to_string(),
            })
            .await?;
        groups.push(group);
    }

    let mut posts = 0;
    for (i, author) in users.iter().enumerate() {
        for n in 1..=4 {
            let group_id = match n % 3 {
                0 => None,
                k => groups.get(k - 1).map(|g| g.id),
            };
            let post = store
                .create_post(NewPost {
                    author_id: author.id,
                    text: format!("Post #{} from {}", n, author.username),
                    group_id,
                    image: None,
                })
                .await?;
            posts += 1;

            let commenter = &users[(i + 1) % users.len()];
            store
                .create_comment(NewComment {
                    post_id: post.id,
                    author_id: commenter.id,
                    text: format!("Nice one, {}!", author.username),
                })
                .await?;
        }
    }

    // Everyone follows the next user round the circle.
    let ids: Vec<UserId> = users.iter().map(|u| u.id).collect();
    for (i, follower) in ids.iter().enumerate() {
        store.create_follow(*follower, ids[(i + 1) % ids.len()]).await?;
    }

    info!(
        "Seeded {} users, {} groups and {} posts",
        users.len(),
        groups.len(),
        posts
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{PostFilter, SqliteStore};

    #[tokio::test]
    async fn test_seed_only_into_empty_store() {
        let store = SqliteStore::new_in_memory().await.unwrap();

        assert!(seed_demo_data(&store).await.unwrap());
        assert_eq!(store.count_users().await.unwrap(), 3);
        assert_eq!(store.count_posts(PostFilter::All).await.unwrap(), 12);

        let leo = store.find_user_by_username("leo").await.unwrap().unwrap();
        let anna = store.find_user_by_username("anna").await.unwrap().unwrap();
        assert!(store.follow_exists(leo.id, anna.id).await.unwrap());

        assert!(!seed_demo_data(&store).await.unwrap());
        assert_eq!(store.count_users().await.unwrap(), 3);
    }
}
