use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    extractors::{auth_extractor::LoginRequired, form_data::FormData, path_extractor::Path},
    models::comment::Comment,
    structs::comment_form::CommentForm,
    utils::{
        app_error::AppError, comment::check_comment_form, forms::FormErrors, render::Page,
        urls::post_detail_url,
    },
    AppState,
};

pub const COMMENT_TEMPLATE: &str = "blog/comment.html";

#[derive(Serialize)]
pub struct EditCommentContext {
    form: CommentForm,
    errors: FormErrors,
    comment: Comment,
}

/// The comment `comment_id`, provided it belongs to `post_id`
pub async fn find_post_comment(
    app_state: &AppState,
    post_id: i64,
    comment_id: i64,
) -> Result<Comment, AppError> {
    app_state
        .store
        .find_comment(comment_id)
        .await?
        .filter(|comment| comment.post_id == post_id)
        .ok_or(AppError::NotFound)
}

pub async fn edit_comment_route(
    State(app_state): State<Arc<AppState>>,
    LoginRequired(auth_user): LoginRequired,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    FormData(form): FormData,
) -> Result<Response, AppError> {
    let comment = find_post_comment(&app_state, post_id, comment_id).await?;

    if !comment.is_authored_by(auth_user.id) {
        warn!("User {} tried to edit comment {comment_id} of user {}", auth_user.id, comment.author_id);
        return Ok(Redirect::to(&post_detail_url(post_id)).into_response());
    }

    let Some(form) = form else {
        let context = EditCommentContext {
            form: CommentForm::from_comment(&comment),
            errors: FormErrors::default(),
            comment,
        };
        return Ok(Page::new(COMMENT_TEMPLATE, context).into_response());
    };

    let form = CommentForm::from_raw(&form);
    match check_comment_form(&form) {
        Ok(text) => {
            app_state.store.update_comment(comment_id, text).await?;
            info!("User {} edited comment {comment_id}", auth_user.id);
            Ok(Redirect::to(&post_detail_url(post_id)).into_response())
        }
        Err(errors) => Ok(Page::new(
            COMMENT_TEMPLATE,
            EditCommentContext {
                form,
                errors,
                comment,
            },
        )
        .into_response()),
    }
}
