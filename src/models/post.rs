use serde::Serialize;
use time::OffsetDateTime;

/// A post joined with its author, location and category, annotated with its
/// comment count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub pub_date: OffsetDateTime,
    pub is_published: bool,
    pub image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub author_id: i64,
    pub author_username: String,
    pub location_id: Option<i64>,
    pub location_name: Option<String>,
    pub category_id: Option<i64>,
    pub category_slug: Option<String>,
    pub category_title: Option<String>,
    pub category_is_published: Option<bool>,
    pub comment_count: i64,
}

impl Post {
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

/// Validated post fields. The author is never part of it: it is given once,
/// when the post is inserted.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub pub_date: OffsetDateTime,
    pub is_published: bool,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub image: Option<String>,
}

/// Which posts to list. Every field left to `None` matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostFilter {
    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
    /// Only keep posts publicly visible at this instant
    pub visible_at: Option<OffsetDateTime>,
}

impl PostFilter {
    pub fn by_author(author_id: i64) -> Self {
        Self {
            author_id: Some(author_id),
            ..Self::default()
        }
    }

    pub fn by_category(category_id: i64) -> Self {
        Self {
            category_id: Some(category_id),
            ..Self::default()
        }
    }
}
