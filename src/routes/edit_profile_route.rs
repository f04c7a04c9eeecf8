use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::{
    extractors::{auth_extractor::LoginRequired, form_data::FormData},
    structs::profile_form::ProfileForm,
    utils::{
        app_error::AppError, forms::FormContext, profile::check_profile_form, render::Page,
        urls::profile_url,
    },
    AppState,
};

const PROFILE_FORM_TEMPLATE: &str = "blog/user.html";

pub async fn edit_profile_route(
    State(app_state): State<Arc<AppState>>,
    LoginRequired(auth_user): LoginRequired,
    FormData(form): FormData,
) -> Result<Response, AppError> {
    let Some(form) = form else {
        let form = ProfileForm::from_user(&auth_user);
        return Ok(Page::new(PROFILE_FORM_TEMPLATE, FormContext::blank(form)).into_response());
    };

    let form = ProfileForm::from_raw(&form);
    if let Err(errors) = check_profile_form(app_state.store.as_ref(), auth_user.id, &form).await? {
        return Ok(Page::new(PROFILE_FORM_TEMPLATE, FormContext { form, errors }).into_response());
    }

    let user = app_state.store.update_profile(auth_user.id, &form).await?;
    info!("User {} updated their profile", user.id);

    Ok(Redirect::to(&profile_url(&user.username)).into_response())
}
