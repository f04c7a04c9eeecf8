use std::sync::Arc;

use axum::extract::{Query, State};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    extractors::{auth_extractor::AuthUser, path_extractor::Path},
    models::{
        post::{Post, PostFilter},
        user::User,
    },
    utils::{
        app_error::AppError,
        pagination::{get_paginator, PageObj, PaginationParams},
        render::Page,
        service::get_posts,
    },
    AppState,
};

#[derive(Serialize)]
pub struct ProfileContext {
    profile: User,
    page_obj: PageObj<Post>,
}

pub async fn profile_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    Path(username): Path<String>,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Page<ProfileContext>, AppError> {
    let store = app_state.store.as_ref();
    let profile = store
        .find_user_by_username(&username)
        .await?
        .ok_or(AppError::NotFound)?;

    // Owners see their drafts and scheduled posts, everybody else only
    // what is public
    let filter = PostFilter::by_author(profile.id);
    let is_owner = auth_user.map_or(false, |user| user.id == profile.id);
    let posts = if is_owner {
        store.list_posts(filter).await?
    } else {
        get_posts(store, filter, OffsetDateTime::now_utc()).await?
    };

    let page_obj = get_paginator(&pagination_params, posts, app_state.config.posts_per_page);
    Ok(Page::new(
        "blog/profile.html",
        ProfileContext { profile, page_obj },
    ))
}
