use serde::Serialize;
use time::OffsetDateTime;

use crate::models::post::Post;
use crate::utils::forms::{RawForm, UploadedFile};
use crate::utils::post::format_pub_date;

/// Post fields as typed in the form. `location` and `category` hold ids.
#[derive(Serialize, Default)]
pub struct PostForm {
    pub title: String,
    pub text: String,
    pub pub_date: String,
    pub location: String,
    pub category: String,
    pub is_published: bool,
    /// Path of the image already attached to the post
    pub image: Option<String>,
    #[serde(skip)]
    pub upload: Option<UploadedFile>,
    #[serde(skip)]
    pub clear_image: bool,
}

impl PostForm {
    pub fn blank(now: OffsetDateTime) -> Self {
        Self {
            pub_date: format_pub_date(now),
            is_published: true,
            ..Self::default()
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            text: post.text.clone(),
            pub_date: format_pub_date(post.pub_date),
            location: post.location_id.map(|id| id.to_string()).unwrap_or_default(),
            category: post.category_id.map(|id| id.to_string()).unwrap_or_default(),
            is_published: post.is_published,
            image: post.image.clone(),
            upload: None,
            clear_image: false,
        }
    }

    pub fn from_raw(raw: &mut RawForm) -> Self {
        Self {
            title: raw.value("title"),
            text: raw.value("text"),
            pub_date: raw.value("pub_date"),
            location: raw.value("location"),
            category: raw.value("category"),
            is_published: raw.checkbox("is_published"),
            image: None,
            upload: raw.take_file("image"),
            clear_image: raw.checkbox("image-clear"),
        }
    }
}
