use serde::Serialize;

use crate::models::comment::Comment;
use crate::utils::forms::RawForm;

#[derive(Serialize, Default)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            text: comment.text.clone(),
        }
    }

    pub fn from_raw(raw: &RawForm) -> Self {
        Self {
            text: raw.value("text"),
        }
    }
}
