//! In-memory store backing the router tests.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::models::{
    category::Category,
    comment::Comment,
    location::Location,
    post::{NewPost, Post, PostFilter},
    user::{NewUser, User},
};
use crate::structs::profile_form::ProfileForm;
use crate::utils::service::is_publicly_visible;

use super::{BlogStore, StoreResult};

struct PostRow {
    id: i64,
    author_id: i64,
    post: NewPost,
    created_at: OffsetDateTime,
}

struct CommentRow {
    id: i64,
    post_id: i64,
    author_id: i64,
    text: String,
    created_at: OffsetDateTime,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<(User, Option<String>)>,
    categories: Vec<Category>,
    locations: Vec<Location>,
    posts: Vec<PostRow>,
    comments: Vec<CommentRow>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn username(&self, user_id: i64) -> String {
        self.users
            .iter()
            .find(|(user, _)| user.id == user_id)
            .map(|(user, _)| user.username.clone())
            .unwrap_or_default()
    }

    fn post(&self, row: &PostRow) -> Post {
        let location = row
            .post
            .location_id
            .and_then(|id| self.locations.iter().find(|l| l.id == id));
        let category = row
            .post
            .category_id
            .and_then(|id| self.categories.iter().find(|c| c.id == id));
        Post {
            id: row.id,
            title: row.post.title.clone(),
            text: row.post.text.clone(),
            pub_date: row.post.pub_date,
            is_published: row.post.is_published,
            image: row.post.image.clone(),
            created_at: row.created_at,
            author_id: row.author_id,
            author_username: self.username(row.author_id),
            location_id: location.map(|l| l.id),
            location_name: location.map(|l| l.name.clone()),
            category_id: category.map(|c| c.id),
            category_slug: category.map(|c| c.slug.clone()),
            category_title: category.map(|c| c.title.clone()),
            category_is_published: category.map(|c| c.is_published),
            comment_count: self.comments.iter().filter(|c| c.post_id == row.id).count() as i64,
        }
    }

    fn comment(&self, row: &CommentRow) -> Comment {
        Comment {
            id: row.id,
            text: row.text.clone(),
            post_id: row.post_id,
            author_id: row.author_id,
            author_username: self.username(row.author_id),
            created_at: row.created_at,
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    writes_fail: AtomicBool,
}

impl MemoryStore {
    pub async fn insert_category(&self, slug: &str, is_published: bool) -> Category {
        let mut tables = self.tables.write().await;
        assert!(
            tables.categories.iter().all(|c| c.slug != slug),
            "duplicate category slug {slug}"
        );
        let category = Category {
            id: tables.next_id(),
            title: slug.to_uppercase(),
            description: String::new(),
            slug: slug.to_string(),
            is_published,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.categories.push(category.clone());
        category
    }

    pub async fn insert_location(&self, name: &str) -> Location {
        let mut tables = self.tables.write().await;
        let location = Location {
            id: tables.next_id(),
            name: name.to_string(),
            is_published: true,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.locations.push(location.clone());
        location
    }

    pub async fn comment_count(&self) -> usize {
        self.tables.read().await.comments.len()
    }

    /// From now on, saving posts and comments fails like a lost connection
    pub fn fail_writes(&self) {
        self.writes_fail.store(true, Ordering::SeqCst);
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.writes_fail.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|(user, _)| user.username == username)
            .map(|(user, _)| user.clone()))
    }

    async fn find_user_by_token(&self, token: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|(_, t)| t.as_deref() == Some(token))
            .map(|(user, _)| user.clone()))
    }

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let user = User {
            id: tables.next_id(),
            username: new_user.username,
            first_name: String::new(),
            last_name: String::new(),
            email: new_user.email,
            password: new_user.password,
            date_joined: OffsetDateTime::now_utc(),
        };
        tables.users.push((user.clone(), None));
        Ok(user)
    }

    async fn update_profile(&self, user_id: i64, profile: &ProfileForm) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let (user, _) = tables
            .users
            .iter_mut()
            .find(|(user, _)| user.id == user_id)
            .ok_or(sqlx::Error::RowNotFound)?;
        user.username = profile.username.clone();
        user.first_name = profile.first_name.clone();
        user.last_name = profile.last_name.clone();
        user.email = profile.email.clone();
        Ok(user.clone())
    }

    async fn set_user_token(&self, user_id: i64, token: Option<&str>) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some((_, t)) = tables.users.iter_mut().find(|(user, _)| user.id == user_id) {
            *t = token.map(str::to_string);
        }
        Ok(())
    }

    async fn find_category(&self, id: i64) -> StoreResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn find_location(&self, id: i64) -> StoreResult<Option<Location>> {
        let tables = self.tables.read().await;
        Ok(tables.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .find(|row| row.id == id)
            .map(|row| tables.post(row)))
    }

    async fn list_posts(&self, filter: PostFilter) -> StoreResult<Vec<Post>> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .iter()
            .map(|row| tables.post(row))
            .filter(|post| filter.author_id.map_or(true, |id| post.author_id == id))
            .filter(|post| filter.category_id.map_or(true, |id| post.category_id == Some(id)))
            .filter(|post| {
                filter
                    .visible_at
                    .map_or(true, |now| is_publicly_visible(post, now))
            })
            .collect();
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn create_post(&self, author_id: i64, post: &NewPost) -> StoreResult<i64> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        tables.posts.push(PostRow {
            id,
            author_id,
            post: post.clone(),
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(id)
    }

    async fn update_post(&self, id: i64, post: &NewPost) -> StoreResult<()> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        if let Some(row) = tables.posts.iter_mut().find(|row| row.id == id) {
            row.post = post.clone();
        }
        Ok(())
    }

    async fn delete_post(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.posts.retain(|row| row.id != id);
        tables.comments.retain(|row| row.post_id != id);
        Ok(())
    }

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .find(|row| row.id == id)
            .map(|row| tables.comment(row)))
    }

    async fn list_comments(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|row| row.post_id == post_id)
            .map(|row| tables.comment(row))
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn create_comment(
        &self,
        post_id: i64,
        author_id: i64,
        text: &str,
        created_at: OffsetDateTime,
    ) -> StoreResult<Comment> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let row = CommentRow {
            id: tables.next_id(),
            post_id,
            author_id,
            text: text.to_string(),
            created_at,
        };
        let comment = tables.comment(&row);
        tables.comments.push(row);
        Ok(comment)
    }

    async fn update_comment(&self, id: i64, text: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(row) = tables.comments.iter_mut().find(|row| row.id == id) {
            row.text = text.to_string();
        }
        Ok(())
    }

    async fn delete_comment(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.comments.retain(|row| row.id != id);
        Ok(())
    }
}
