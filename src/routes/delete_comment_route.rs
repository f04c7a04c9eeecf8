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
    utils::{app_error::AppError, render::Page, urls::post_detail_url},
    AppState,
};

use super::edit_comment_route::{find_post_comment, COMMENT_TEMPLATE};

#[derive(Serialize)]
pub struct DeleteCommentContext {
    comment: Comment,
}

pub async fn delete_comment_route(
    State(app_state): State<Arc<AppState>>,
    LoginRequired(auth_user): LoginRequired,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    FormData(form): FormData,
) -> Result<Response, AppError> {
    let comment = find_post_comment(&app_state, post_id, comment_id).await?;

    if !comment.is_authored_by(auth_user.id) {
        warn!("User {} tried to delete comment {comment_id} of user {}", auth_user.id, comment.author_id);
        return Ok(Redirect::to(&post_detail_url(post_id)).into_response());
    }

    if form.is_none() {
        return Ok(Page::new(COMMENT_TEMPLATE, DeleteCommentContext { comment }).into_response());
    }

    app_state.store.delete_comment(comment_id).await?;
    info!("User {} deleted comment {comment_id}", auth_user.id);

    Ok(Redirect::to(&post_detail_url(post_id)).into_response())
}
