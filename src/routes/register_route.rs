use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::{
    extractors::form_data::FormData,
    structs::register_form::RegisterForm,
    utils::{
        app_error::AppError,
        forms::FormContext,
        register::check_register_form,
        render::Page,
        urls::INDEX_URL,
    },
    AppState,
};

const REGISTER_TEMPLATE: &str = "registration/registration_form.html";

pub async fn register_route(
    State(app_state): State<Arc<AppState>>,
    FormData(form): FormData,
) -> Result<Response, AppError> {
    let Some(form) = form else {
        let form = RegisterForm::default();
        return Ok(Page::new(REGISTER_TEMPLATE, FormContext::blank(form)).into_response());
    };

    let form = RegisterForm::from_raw(&form);
    let new_user = match check_register_form(app_state.store.as_ref(), &form).await? {
        Ok(new_user) => new_user,
        Err(errors) => {
            return Ok(Page::new(REGISTER_TEMPLATE, FormContext { form, errors }).into_response());
        }
    };

    let user = app_state.store.create_user(new_user).await?;
    info!("Registered user {} (@{})", user.id, user.username);

    Ok(Redirect::to(INDEX_URL).into_response())
}
