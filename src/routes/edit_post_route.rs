use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info, warn};

use crate::{
    extractors::{auth_extractor::LoginRequired, form_data::FormData, path_extractor::Path},
    structs::post_form::PostForm,
    utils::{
        app_error::AppError,
        forms::FormContext,
        media::{remove_post_image, save_post_image},
        post::check_post_form,
        render::Page,
        urls::post_detail_url,
    },
    AppState,
};

use super::create_post_route::POST_FORM_TEMPLATE;

pub async fn edit_post_route(
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
        warn!("User {} tried to edit post {post_id} of user {}", auth_user.id, post.author_id);
        return Ok(Redirect::to(&post_detail_url(post_id)).into_response());
    }

    let Some(mut form) = form else {
        let form = PostForm::from_post(&post);
        return Ok(Page::new(POST_FORM_TEMPLATE, FormContext::blank(form)).into_response());
    };

    let mut form = PostForm::from_raw(&mut form);
    let mut changes = match check_post_form(app_state.store.as_ref(), &form).await? {
        Ok(changes) => changes,
        Err(errors) => {
            form.image = post.image;
            return Ok(Page::new(POST_FORM_TEMPLATE, FormContext { form, errors }).into_response());
        }
    };

    let uploaded = match &form.upload {
        Some(upload) => Some(
            save_post_image(&app_state.config.media_root, upload)
                .await
                .map_err(|e| {
                    error!("Error saving image of post {post_id} : {e}");
                    AppError::InternalServerError
                })?,
        ),
        None => None,
    };
    changes.image = match &uploaded {
        Some(image) => Some(image.clone()),
        None if form.clear_image => None,
        None => post.image,
    };

    if let Err(e) = app_state.store.update_post(post_id, &changes).await {
        if let Some(image) = &uploaded {
            remove_post_image(&app_state.config.media_root, image).await;
        }
        return Err(e.into());
    }
    info!("User {} edited post {post_id}", auth_user.id);

    Ok(Redirect::to(&post_detail_url(post_id)).into_response())
}
