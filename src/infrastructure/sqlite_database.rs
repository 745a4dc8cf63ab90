use async_trait::async_trait;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row};
use std::str::FromStr;
use tracing::info;

use crate::core::{current_time_millis, millis_to_datetime, CommentId, GroupId, PostId, UserId};
use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::{
    CommentRepository, FollowRepository, GroupRepository, PostFilter, PostRepository,
    UserRepository,
};
use crate::models::{
    AuthorRef, Comment, CommentView, Group, GroupRef, NewComment, NewGroup, NewPost, NewUser,
    Post, PostChanges, PostView, User,
};

const POST_VIEW_COLUMNS: &str = "SELECT p.id AS id, p.text AS text, p.image AS image, \
     p.pub_date AS pub_date, p.author_id AS author_id, u.username AS author_username, \
     g.id AS group_id, g.title AS group_title, g.slug AS group_slug \
     FROM posts p \
     JOIN users u ON u.id = p.author_id \
     LEFT JOIN post_groups g ON g.id = p.group_id";

/// SQLite implementation of every repository interface
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `database_url`, creating the database file if needed, and
    /// make sure the schema exists.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        if database_url.contains(":memory:") {
            return Self::new_in_memory().await;
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::ConfigurationError(format!(
                    "Invalid database URL {}: {}",
                    database_url, e
                ))
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to connect to {}: {}", database_url, e))
            })?;

        let store = Self { pool };
        store.initialize().await?;
        info!("Connected to SQLite database at {}", database_url);
        Ok(store)
    }

    /// Every connection to `sqlite::memory:` is its own database, so the pool
    /// is pinned to a single long-lived connection.
    pub async fn new_in_memory() -> AppResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to connect to in-memory SQLite: {}", e))
            })?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn initialize(&self) -> AppResult<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL,
                first_name TEXT NOT NULL DEFAULT '',
                last_name TEXT NOT NULL DEFAULT '',
                created INTEGER NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS post_groups (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL DEFAULT ''
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                image TEXT,
                pub_date INTEGER NOT NULL,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                group_id INTEGER REFERENCES post_groups(id) ON DELETE SET NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                created INTEGER NOT NULL,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS follows (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created INTEGER NOT NULL,
                UNIQUE (user_id, author_id)
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_posts_pub_date ON posts(pub_date DESC, id DESC)",
            "CREATE INDEX IF NOT EXISTS idx_posts_group ON posts(group_id, pub_date DESC)",
            "CREATE INDEX IF NOT EXISTS idx_posts_author ON posts(author_id, pub_date DESC)",
            "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id, created DESC)",
            "CREATE INDEX IF NOT EXISTS idx_follows_author ON follows(author_id)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Failed to initialize schema: {}", e)))?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: UserId(row.get("id")),
        username: row.get("username"),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        created: millis_to_datetime(row.get("created")),
    }
}

fn group_from_row(row: &SqliteRow) -> Group {
    Group {
        id: GroupId(row.get("id")),
        title: row.get("title"),
        slug: row.get("slug"),
        description: row.get("description"),
    }
}

fn post_from_row(row: &SqliteRow) -> Post {
    Post {
        id: PostId(row.get("id")),
        text: row.get("text"),
        image: row.get("image"),
        pub_date: millis_to_datetime(row.get("pub_date")),
        author_id: UserId(row.get("author_id")),
        group_id: row.get::<Option<i64>, _>("group_id").map(GroupId),
    }
}

fn post_view_from_row(row: &SqliteRow) -> PostView {
    let group = match row.get::<Option<i64>, _>("group_id") {
        Some(id) => Some(GroupRef {
            id: GroupId(id),
            title: row.get("group_title"),
            slug: row.get("group_slug"),
        }),
        None => None,
    };
    PostView {
        id: PostId(row.get("id")),
        text: row.get("text"),
        image: row.get("image"),
        pub_date: millis_to_datetime(row.get("pub_date")),
        author: AuthorRef {
            id: UserId(row.get("author_id")),
            username: row.get("author_username"),
        },
        group,
    }
}

fn push_post_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: PostFilter) {
    match filter {
        PostFilter::All => {}
        PostFilter::InGroup(group_id) => {
            qb.push(" WHERE p.group_id = ");
            qb.push_bind(group_id.value());
        }
        PostFilter::ByAuthor(author_id) => {
            qb.push(" WHERE p.author_id = ");
            qb.push_bind(author_id.value());
        }
        PostFilter::FollowedBy(user_id) => {
            qb.push(" WHERE p.author_id IN (SELECT f.author_id FROM follows f WHERE f.user_id = ");
            qb.push_bind(user_id.value());
            qb.push(")");
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let now = current_time_millis();
        let result = sqlx::query(
            "INSERT INTO users (username, email, first_name, last_name, created) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Validation(format!("Username '{}' is already taken", user.username))
            } else {
                AppError::DatabaseError(format!("Failed to create user {}: {}", user.username, e))
            }
        })?;

        Ok(User {
            id: UserId(result.last_insert_rowid()),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created: millis_to_datetime(now),
        })
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, first_name, last_name, created FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to find user {}: {}", username, e))
        })?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn count_users(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count users: {}", e)))?
            .get("count");
        Ok(count as u64)
    }
}

#[async_trait]
impl GroupRepository for SqliteStore {
    async fn create_group(&self, group: NewGroup) -> AppResult<Group> {
        let result =
            sqlx::query("INSERT INTO post_groups (title, slug, description) VALUES (?, ?, ?)")
                .bind(&group.title)
                .bind(&group.slug)
                .bind(&group.description)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        AppError::Validation(format!("Group slug '{}' is already taken", group.slug))
                    } else {
                        AppError::DatabaseError(format!(
                            "Failed to create group {}: {}",
                            group.slug, e
                        ))
                    }
                })?;

        Ok(Group {
            id: GroupId(result.last_insert_rowid()),
            title: group.title,
            slug: group.slug,
            description: group.description,
        })
    }

    async fn get_group(&self, id: GroupId) -> AppResult<Option<Group>> {
        let row = sqlx::query("SELECT id, title, slug, description FROM post_groups WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to get group {}: {}", id, e)))?;
        Ok(row.as_ref().map(group_from_row))
    }

    async fn find_group_by_slug(&self, slug: &str) -> AppResult<Option<Group>> {
        let row =
            sqlx::query("SELECT id, title, slug, description FROM post_groups WHERE slug = ?")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to find group {}: {}", slug, e))
                })?;
        Ok(row.as_ref().map(group_from_row))
    }

    async fn list_groups(&self) -> AppResult<Vec<Group>> {
        let rows = sqlx::query("SELECT id, title, slug, description FROM post_groups ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list groups: {}", e)))?;
        Ok(rows.iter().map(group_from_row).collect())
    }
}

#[async_trait]
impl PostRepository for SqliteStore {
    async fn create_post(&self, post: NewPost) -> AppResult<Post> {
        let now = current_time_millis();
        let result = sqlx::query(
            "INSERT INTO posts (text, image, pub_date, author_id, group_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&post.text)
        .bind(&post.image)
        .bind(now)
        .bind(post.author_id.value())
        .bind(post.group_id.map(GroupId::value))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!(
                "Failed to create post for author {}: {}",
                post.author_id, e
            ))
        })?;

        Ok(Post {
            id: PostId(result.last_insert_rowid()),
            text: post.text,
            image: post.image,
            pub_date: millis_to_datetime(now),
            author_id: post.author_id,
            group_id: post.group_id,
        })
    }

    async fn get_post(&self, id: PostId) -> AppResult<Option<Post>> {
        let row = sqlx::query(
            "SELECT id, text, image, pub_date, author_id, group_id FROM posts WHERE id = ?",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get post {}: {}", id, e)))?;
        Ok(row.as_ref().map(post_from_row))
    }

    async fn get_post_view(&self, id: PostId) -> AppResult<Option<PostView>> {
        let mut qb = QueryBuilder::<Sqlite>::new(POST_VIEW_COLUMNS);
        qb.push(" WHERE p.id = ");
        qb.push_bind(id.value());

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to get post {}: {}", id, e)))?;
        Ok(row.as_ref().map(post_view_from_row))
    }

    async fn update_post(&self, id: PostId, changes: PostChanges) -> AppResult<Post> {
        let result = sqlx::query("UPDATE posts SET text = ?, group_id = ?, image = ? WHERE id = ?")
            .bind(&changes.text)
            .bind(changes.group_id.map(GroupId::value))
            .bind(&changes.image)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to update post {}: {}", id, e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Post {} not found", id)));
        }

        self.get_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
    }

    async fn count_posts(&self, filter: PostFilter) -> AppResult<u64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) AS count FROM posts p");
        push_post_filter(&mut qb, filter);

        let count: i64 = qb
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count posts: {}", e)))?
            .get("count");
        Ok(count as u64)
    }

    async fn list_posts(
        &self,
        filter: PostFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<PostView>> {
        let mut qb = QueryBuilder::<Sqlite>::new(POST_VIEW_COLUMNS);
        push_post_filter(&mut qb, filter);
        qb.push(" ORDER BY p.pub_date DESC, p.id DESC LIMIT ");
        qb.push_bind(limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(offset as i64);

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list posts: {}", e)))?;
        Ok(rows.iter().map(post_view_from_row).collect())
    }
}

#[async_trait]
impl CommentRepository for SqliteStore {
    async fn create_comment(&self, comment: NewComment) -> AppResult<Comment> {
        let now = current_time_millis();
        let result = sqlx::query(
            "INSERT INTO comments (text, created, author_id, post_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&comment.text)
        .bind(now)
        .bind(comment.author_id.value())
        .bind(comment.post_id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!(
                "Failed to create comment on post {}: {}",
                comment.post_id, e
            ))
        })?;

        Ok(Comment {
            id: CommentId(result.last_insert_rowid()),
            text: comment.text,
            created: millis_to_datetime(now),
            author_id: comment.author_id,
            post_id: comment.post_id,
        })
    }

    async fn list_comments(&self, post_id: PostId) -> AppResult<Vec<CommentView>> {
        let rows = sqlx::query(
            "SELECT c.id AS id, c.text AS text, c.created AS created, \
             c.author_id AS author_id, u.username AS author_username \
             FROM comments c JOIN users u ON u.id = c.author_id \
             WHERE c.post_id = ? ORDER BY c.created DESC, c.id DESC",
        )
        .bind(post_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to list comments of post {}: {}", post_id, e))
        })?;

        Ok(rows
            .iter()
            .map(|row| CommentView {
                id: CommentId(row.get("id")),
                text: row.get("text"),
                created: millis_to_datetime(row.get("created")),
                author: AuthorRef {
                    id: UserId(row.get("author_id")),
                    username: row.get("author_username"),
                },
            })
            .collect())
    }
}

#[async_trait]
impl FollowRepository for SqliteStore {
    async fn create_follow(&self, user_id: UserId, author_id: UserId) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO follows (user_id, author_id, created) VALUES (?, ?, ?)",
        )
        .bind(user_id.value())
        .bind(author_id.value())
        .bind(current_time_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create follow: {}", e)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_follow(&self, user_id: UserId, author_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE user_id = ? AND author_id = ?")
            .bind(user_id.value())
            .bind(author_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete follow: {}", e)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn follow_exists(&self, user_id: UserId, author_id: UserId) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM follows WHERE user_id = ? AND author_id = ?")
            .bind(user_id.value())
            .bind(author_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to check follow existence: {}", e))
            })?;
        Ok(row.is_some())
    }

    async fn count_followers(&self, author_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM follows WHERE author_id = ?")
            .bind(author_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count followers: {}", e)))?
            .get("count");
        Ok(count as u64)
    }

    async fn count_following(&self, user_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM follows WHERE user_id = ?")
            .bind(user_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to count followed authors: {}", e))
            })?
            .get("count");
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_users() -> (SqliteStore, User, User) {
        let store = SqliteStore::new_in_memory().await.unwrap();
        let alice = store
            .create_user(NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                first_name: "Alice".to_string(),
                last_name: String::new(),
            })
            .await
            .unwrap();
        let bob = store
            .create_user(NewUser {
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                first_name: String::new(),
                last_name: String::new(),
            })
            .await
            .unwrap();
        (store, alice, bob)
    }

    fn new_post(author: &User, text: &str, group_id: Option<GroupId>) -> NewPost {
        NewPost {
            author_id: author.id,
            text: text.to_string(),
            group_id,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_is_validation_error() {
        let (store, _, _) = store_with_users().await;
        let result = store
            .create_user(NewUser {
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
                first_name: String::new(),
                last_name: String::new(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.count_users().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_posts_newest_first_with_joins() {
        let (store, alice, bob) = store_with_users().await;
        let group = store
            .create_group(NewGroup {
                title: "Cats".to_string(),
                slug: "cats".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();

        let first = store.create_post(new_post(&alice, "first", None)).await.unwrap();
        let second = store
            .create_post(new_post(&bob, "second", Some(group.id)))
            .await
            .unwrap();

        let posts = store.list_posts(PostFilter::All, 10, 0).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, second.id);
        assert_eq!(posts[1].id, first.id);
        assert_eq!(posts[0].author.username, "bob");
        assert_eq!(posts[0].group.as_ref().map(|g| g.slug.as_str()), Some("cats"));
        assert!(posts[1].group.is_none());

        assert_eq!(store.count_posts(PostFilter::InGroup(group.id)).await.unwrap(), 1);
        assert_eq!(store.count_posts(PostFilter::ByAuthor(alice.id)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_limit_and_offset() {
        let (store, alice, _) = store_with_users().await;
        for i in 0..5 {
            store
                .create_post(new_post(&alice, &format!("post {}", i), None))
                .await
                .unwrap();
        }
        let page = store.list_posts(PostFilter::All, 2, 2).await.unwrap();
        let texts: Vec<&str> = page.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["post 2", "post 1"]);
    }

    #[tokio::test]
    async fn test_followed_by_filter() {
        let (store, alice, bob) = store_with_users().await;
        store.create_post(new_post(&alice, "by alice", None)).await.unwrap();
        store.create_post(new_post(&bob, "by bob", None)).await.unwrap();

        assert_eq!(store.count_posts(PostFilter::FollowedBy(alice.id)).await.unwrap(), 0);

        assert!(store.create_follow(alice.id, bob.id).await.unwrap());
        let posts = store.list_posts(PostFilter::FollowedBy(alice.id), 10, 0).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].text, "by bob");
    }

    #[tokio::test]
    async fn test_follow_edge_is_unique() {
        let (store, alice, bob) = store_with_users().await;
        assert!(store.create_follow(alice.id, bob.id).await.unwrap());
        assert!(!store.create_follow(alice.id, bob.id).await.unwrap());
        assert_eq!(store.count_followers(bob.id).await.unwrap(), 1);
        assert_eq!(store.count_following(alice.id).await.unwrap(), 1);

        assert!(store.delete_follow(alice.id, bob.id).await.unwrap());
        assert!(!store.delete_follow(alice.id, bob.id).await.unwrap());
        assert!(!store.follow_exists(alice.id, bob.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_post_replaces_fields() {
        let (store, alice, _) = store_with_users().await;
        let mut post = new_post(&alice, "draft", None);
        post.image = Some("cat.png".to_string());
        let post = store.create_post(post).await.unwrap();

        let updated = store
            .update_post(
                post.id,
                PostChanges {
                    text: "edited".to_string(),
                    group_id: None,
                    image: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.text, "edited");
        assert_eq!(updated.image, None);
        assert_eq!(updated.author_id, alice.id);

        let missing = store
            .update_post(
                PostId(9999),
                PostChanges {
                    text: "x".to_string(),
                    group_id: None,
                    image: None,
                },
            )
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_comments_newest_first() {
        let (store, alice, bob) = store_with_users().await;
        let post = store.create_post(new_post(&alice, "post", None)).await.unwrap();
        for (author, text) in [(&alice, "one"), (&bob, "two")] {
            store
                .create_comment(NewComment {
                    post_id: post.id,
                    author_id: author.id,
                    text: text.to_string(),
                })
                .await
                .unwrap();
        }
        let comments = store.list_comments(post.id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "two");
        assert_eq!(comments[0].author.username, "bob");
    }
}
