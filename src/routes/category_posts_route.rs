use std::sync::Arc;

use axum::extract::{Query, State};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    extractors::path_extractor::Path,
    models::{
        category::Category,
        post::{Post, PostFilter},
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
pub struct CategoryContext {
    category: Category,
    page_obj: PageObj<Post>,
}

pub async fn category_posts_route(
    State(app_state): State<Arc<AppState>>,
    Path(category_slug): Path<String>,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Page<CategoryContext>, AppError> {
    let category = app_state
        .store
        .find_category_by_slug(&category_slug)
        .await?
        .filter(|category| category.is_published)
        .ok_or(AppError::NotFound)?;

    let posts = get_posts(
        app_state.store.as_ref(),
        PostFilter::by_category(category.id),
        OffsetDateTime::now_utc(),
    )
    .await?;
    let page_obj = get_paginator(&pagination_params, posts, app_state.config.posts_per_page);
    Ok(Page::new(
        "blog/category.html",
        CategoryContext { category, page_obj },
    ))
}
