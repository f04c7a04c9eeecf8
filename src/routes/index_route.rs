use std::sync::Arc;

use axum::extract::{Query, State};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    models::post::{Post, PostFilter},
    utils::{
        app_error::AppError,
        pagination::{get_paginator, PageObj, PaginationParams},
        render::Page,
        service::get_posts,
    },
    AppState,
};

#[derive(Serialize)]
pub struct IndexContext {
    page_obj: PageObj<Post>,
}

pub async fn index_route(
    State(app_state): State<Arc<AppState>>,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Page<IndexContext>, AppError> {
    let posts = get_posts(
        app_state.store.as_ref(),
        PostFilter::default(),
        OffsetDateTime::now_utc(),
    )
    .await?;
    let page_obj = get_paginator(&pagination_params, posts, app_state.config.posts_per_page);
    Ok(Page::new("blog/index.html", IndexContext { page_obj }))
}
