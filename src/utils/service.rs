use time::OffsetDateTime;

use crate::models::{
    post::{Post, PostFilter},
    user::User,
};
use crate::store::{BlogStore, StoreResult};

use super::app_error::AppError;

/// Whether anyone may see `post` at `now`: the post and its category are
/// published and the publication date has come.
pub fn is_publicly_visible(post: &Post, now: OffsetDateTime) -> bool {
    post.is_published && post.category_is_published == Some(true) && post.pub_date <= now
}

/// Posts matching `filter` that are publicly visible at `now`, newest first,
/// with their comment count.
pub async fn get_posts(
    store: &dyn BlogStore,
    filter: PostFilter,
    now: OffsetDateTime,
) -> StoreResult<Vec<Post>> {
    store
        .list_posts(PostFilter {
            visible_at: Some(now),
            ..filter
        })
        .await
}

/// Fetches a post the requester is allowed to see: their own post, whatever
/// its state, or a publicly visible one.
pub async fn find_visible_post(
    store: &dyn BlogStore,
    requester: Option<&User>,
    post_id: i64,
    now: OffsetDateTime,
) -> Result<Post, AppError> {
    let post = store.find_post(post_id).await?.ok_or(AppError::NotFound)?;
    let is_author = requester.map_or(false, |user| post.is_authored_by(user.id));
    if is_author || is_publicly_visible(&post, now) {
        Ok(post)
    } else {
        Err(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use super::*;

    fn post(is_published: bool, category_is_published: Option<bool>, pub_date: OffsetDateTime) -> Post {
        Post {
            id: 1,
            title: "Title".to_string(),
            text: "Text".to_string(),
            pub_date,
            is_published,
            image: None,
            created_at: pub_date,
            author_id: 1,
            author_username: "author".to_string(),
            location_id: None,
            location_name: None,
            category_id: category_is_published.map(|_| 1),
            category_slug: category_is_published.map(|_| "travel".to_string()),
            category_title: category_is_published.map(|_| "Travel".to_string()),
            category_is_published,
            comment_count: 0,
        }
    }

    #[test]
    fn visibility_needs_every_condition() {
        let now = OffsetDateTime::now_utc();
        let past = now - Duration::days(1);
        let future = now + Duration::days(1);

        for is_published in [true, false] {
            for category in [Some(true), Some(false), None] {
                for (pub_date, is_past) in [(past, true), (now, true), (future, false)] {
                    let expected = is_published && category == Some(true) && is_past;
                    assert_eq!(
                        is_publicly_visible(&post(is_published, category, pub_date), now),
                        expected,
                        "is_published={is_published} category={category:?} pub_date={pub_date}"
                    );
                }
            }
        }
    }
}
