use axum::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::models::{
    category::Category,
    comment::Comment,
    location::Location,
    post::{NewPost, Post, PostFilter},
    user::{NewUser, User},
};
use crate::structs::profile_form::ProfileForm;

use super::{BlogStore, StoreResult};

const USER_COLUMNS: &str =
    "id, username, first_name, last_name, email, password, date_joined";

const SELECT_POSTS: &str = r#"
SELECT p.id, p.title, p.text, p.pub_date, p.is_published, p.image, p.created_at,
       p.author_id, u.username AS author_username,
       p.location_id, l.name AS location_name,
       p.category_id, c.slug AS category_slug, c.title AS category_title,
       c.is_published AS category_is_published,
       (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count
FROM posts p
JOIN users u ON u.id = p.author_id
LEFT JOIN locations l ON l.id = p.location_id
LEFT JOIN categories c ON c.id = p.category_id
"#;

const SELECT_COMMENTS: &str = r#"
SELECT cm.id, cm.text, cm.post_id, cm.author_id, u.username AS author_username, cm.created_at
FROM comments cm
JOIN users u ON u.id = cm.author_id
"#;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_user_by_token(&self, token: &str) -> StoreResult<Option<User>> {
        sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE token = $1"))
            .bind(token)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        sqlx::query_as(&format!(
            "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(user.username)
        .bind(user.email)
        .bind(user.password)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_profile(&self, user_id: i64, profile: &ProfileForm) -> StoreResult<User> {
        sqlx::query_as(&format!(
            "UPDATE users SET username = $2, first_name = $3, last_name = $4, email = $5 \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_user_token(&self, user_id: i64, token: Option<&str>) -> StoreResult<()> {
        sqlx::query("UPDATE users SET token = $2 WHERE id = $1")
            .bind(user_id)
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_category(&self, id: i64) -> StoreResult<Option<Category>> {
        sqlx::query_as(
            "SELECT id, title, description, slug, is_published, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        sqlx::query_as(
            "SELECT id, title, description, slug, is_published, created_at FROM categories WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_location(&self, id: i64) -> StoreResult<Option<Location>> {
        sqlx::query_as("SELECT id, name, is_published, created_at FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>> {
        sqlx::query_as(&format!("{SELECT_POSTS} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_posts(&self, filter: PostFilter) -> StoreResult<Vec<Post>> {
        // Same rule as `utils::service::is_publicly_visible`. A post without
        // a category has a NULL `c.is_published` and is filtered out.
        sqlx::query_as(&format!(
            "{SELECT_POSTS} \
             WHERE ($1::BIGINT IS NULL OR p.author_id = $1) \
             AND ($2::BIGINT IS NULL OR p.category_id = $2) \
             AND ($3::TIMESTAMPTZ IS NULL OR (p.is_published AND c.is_published AND p.pub_date <= $3)) \
             ORDER BY p.pub_date DESC, p.id DESC"
        ))
        .bind(filter.author_id)
        .bind(filter.category_id)
        .bind(filter.visible_at)
        .fetch_all(&self.pool)
        .await
    }

    async fn create_post(&self, author_id: i64, post: &NewPost) -> StoreResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO posts (title, text, pub_date, author_id, location_id, category_id, image, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(&post.title)
        .bind(&post.text)
        .bind(post.pub_date)
        .bind(author_id)
        .bind(post.location_id)
        .bind(post.category_id)
        .bind(&post.image)
        .bind(post.is_published)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_post(&self, id: i64, post: &NewPost) -> StoreResult<()> {
        sqlx::query(
            "UPDATE posts SET title = $2, text = $3, pub_date = $4, location_id = $5, \
             category_id = $6, image = $7, is_published = $8 WHERE id = $1",
        )
        .bind(id)
        .bind(&post.title)
        .bind(&post.text)
        .bind(post.pub_date)
        .bind(post.location_id)
        .bind(post.category_id)
        .bind(&post.image)
        .bind(post.is_published)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_post(&self, id: i64) -> StoreResult<()> {
        // Comments go with it through `ON DELETE CASCADE`
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>> {
        sqlx::query_as(&format!("{SELECT_COMMENTS} WHERE cm.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_comments(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        sqlx::query_as(&format!(
            "{SELECT_COMMENTS} WHERE cm.post_id = $1 ORDER BY cm.created_at, cm.id"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn create_comment(
        &self,
        post_id: i64,
        author_id: i64,
        text: &str,
        created_at: OffsetDateTime,
    ) -> StoreResult<Comment> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO comments (text, post_id, author_id, created_at) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(text)
        .bind(post_id)
        .bind(author_id)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;
        sqlx::query_as(&format!("{SELECT_COMMENTS} WHERE cm.id = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_comment(&self, id: i64, text: &str) -> StoreResult<()> {
        sqlx::query("UPDATE comments SET text = $2 WHERE id = $1")
            .bind(id)
            .bind(text)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_comment(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
