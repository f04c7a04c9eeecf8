//! Persistence for users, posts, comments, categories and locations.
//!
//! Deletion contract, honoured by every implementation:
//! - deleting a post deletes its comments,
//! - deleting a category or a location detaches its posts,
//! - deleting a user deletes their posts and comments.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use axum::async_trait;
use time::OffsetDateTime;

use crate::models::{
    category::Category,
    comment::Comment,
    location::Location,
    post::{NewPost, Post, PostFilter},
    user::{NewUser, User},
};
use crate::structs::profile_form::ProfileForm;

pub type StoreResult<T> = Result<T, sqlx::Error>;

#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_token(&self, token: &str) -> StoreResult<Option<User>>;
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    /// Overwrites the profile fields of `user_id` with the validated form
    async fn update_profile(&self, user_id: i64, profile: &ProfileForm) -> StoreResult<User>;
    async fn set_user_token(&self, user_id: i64, token: Option<&str>) -> StoreResult<()>;

    async fn find_category(&self, id: i64) -> StoreResult<Option<Category>>;
    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;
    async fn find_location(&self, id: i64) -> StoreResult<Option<Location>>;

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>>;
    /// Posts matching `filter`, newest `pub_date` first
    async fn list_posts(&self, filter: PostFilter) -> StoreResult<Vec<Post>>;
    /// Inserts the post and returns its id
    async fn create_post(&self, author_id: i64, post: &NewPost) -> StoreResult<i64>;
    async fn update_post(&self, id: i64, post: &NewPost) -> StoreResult<()>;
    async fn delete_post(&self, id: i64) -> StoreResult<()>;

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>>;
    /// Comments of `post_id`, oldest first
    async fn list_comments(&self, post_id: i64) -> StoreResult<Vec<Comment>>;
    async fn create_comment(
        &self,
        post_id: i64,
        author_id: i64,
        text: &str,
        created_at: OffsetDateTime,
    ) -> StoreResult<Comment>;
    async fn update_comment(&self, id: i64, text: &str) -> StoreResult<()>;
    async fn delete_comment(&self, id: i64) -> StoreResult<()>;
}
