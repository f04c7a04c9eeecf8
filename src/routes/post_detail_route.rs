use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    extractors::{auth_extractor::AuthUser, path_extractor::Path},
    models::{comment::Comment, post::Post},
    structs::comment_form::CommentForm,
    utils::{app_error::AppError, render::Page, service::find_visible_post},
    AppState,
};

#[derive(Serialize)]
pub struct DetailContext {
    post: Post,
    comments: Vec<Comment>,
    form: CommentForm,
}

pub async fn post_detail_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    Path(post_id): Path<i64>,
) -> Result<Page<DetailContext>, AppError> {
    let post = find_visible_post(
        app_state.store.as_ref(),
        auth_user.as_deref(),
        post_id,
        OffsetDateTime::now_utc(),
    )
    .await?;
    let comments = app_state.store.list_comments(post.id).await?;
    Ok(Page::new(
        "blog/detail.html",
        DetailContext {
            post,
            comments,
            form: CommentForm::default(),
        },
    ))
}
