use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{info, warn};

use crate::{
    extractors::{auth_extractor::LoginRequired, form_data::FormData, path_extractor::Path},
    structs::post_form::PostForm,
    utils::{
        app_error::AppError,
        forms::FormContext,
        render::Page,
        urls::{post_detail_url, INDEX_URL},
    },
    AppState,
};

use super::create_post_route::POST_FORM_TEMPLATE;

pub async fn delete_post_route(
    State(app_state): State<Arc<AppState>>,
    LoginRequired(auth_user): LoginRequired,
    Path(post_id): Path<i64>,
    FormData(form): FormData,
) -> Result<Response, AppError> {
    let post = app_state
        .store
        .find_post(post_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !post.is_authored_by(auth_user.id) {
        warn!("User {} tried to delete post {post_id} of user {}", auth_user.id, post.author_id);
        return Ok(Redirect::to(&post_detail_url(post_id)).into_response());
    }

    if form.is_none() {
        let form = PostForm::from_post(&post);
        return Ok(Page::new(POST_FORM_TEMPLATE, FormContext::blank(form)).into_response());
    }

    app_state.store.delete_post(post_id).await?;
    info!("User {} deleted post {post_id}", auth_user.id);

    Ok(Redirect::to(INDEX_URL).into_response())
}
