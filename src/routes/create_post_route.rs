use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use time::OffsetDateTime;
use tracing::{error, info};

use crate::{
    extractors::{auth_extractor::LoginRequired, form_data::FormData},
    structs::post_form::PostForm,
    utils::{
        app_error::AppError,
        forms::FormContext,
        media::{remove_post_image, save_post_image},
        post::check_post_form,
        render::Page,
        urls::profile_url,
    },
    AppState,
};

pub const POST_FORM_TEMPLATE: &str = "blog/create.html";

pub async fn create_post_route(
    State(app_state): State<Arc<AppState>>,
    LoginRequired(auth_user): LoginRequired,
    FormData(form): FormData,
) -> Result<Response, AppError> {
    let Some(mut form) = form else {
        let form = PostForm::blank(OffsetDateTime::now_utc());
        return Ok(Page::new(POST_FORM_TEMPLATE, FormContext::blank(form)).into_response());
    };

    let form = PostForm::from_raw(&mut form);
    let mut new_post = match check_post_form(app_state.store.as_ref(), &form).await? {
        Ok(new_post) => new_post,
        Err(errors) => {
            return Ok(Page::new(POST_FORM_TEMPLATE, FormContext { form, errors }).into_response());
        }
    };

    if let Some(upload) = &form.upload {
        let image = save_post_image(&app_state.config.media_root, upload)
            .await
            .map_err(|e| {
                error!("Error saving image of user {} : {e}", auth_user.id);
                AppError::InternalServerError
            })?;
        new_post.image = Some(image);
    }

    let post_id = match app_state.store.create_post(auth_user.id, &new_post).await {
        Ok(post_id) => post_id,
        Err(e) => {
            if let Some(image) = &new_post.image {
                remove_post_image(&app_state.config.media_root, image).await;
            }
            return Err(e.into());
        }
    };
    info!("User {} created post {post_id}", auth_user.id);

    Ok(Redirect::to(&profile_url(&auth_user.username)).into_response())
}
