use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    extractors::form_data::FormData,
    structs::login_form::LoginForm,
    utils::{
        app_error::AppError,
        forms::{FormContext, FormErrors},
        register::verify_password,
        render::Page,
        token::{generate_token, SESSION_COOKIE},
        urls::safe_next,
    },
    AppState,
};

const LOGIN_TEMPLATE: &str = "registration/login.html";

#[derive(Deserialize)]
pub struct LoginParams {
    next: Option<String>,
}

pub async fn login_route(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<LoginParams>,
    jar: CookieJar,
    FormData(form): FormData,
) -> Result<Response, AppError> {
    let Some(form) = form else {
        let form = LoginForm {
            next: params.next,
            ..LoginForm::default()
        };
        return Ok(Page::new(LOGIN_TEMPLATE, FormContext::blank(form)).into_response());
    };

    let mut form = LoginForm::from_raw(&form);
    if form.next.is_none() {
        form.next = params.next;
    }

    let user = match app_state.store.find_user_by_username(&form.username).await? {
        Some(user) if verify_password(&form.password, &user.password) => user,
        _ => {
            warn!("Failed login for `{}`", form.username);
            let mut errors = FormErrors::default();
            errors.add(
                FormErrors::NON_FIELD,
                "Please enter a correct username and password. Note that both fields may be case-sensitive.",
            );
            return Ok(Page::new(LOGIN_TEMPLATE, FormContext { form, errors }).into_response());
        }
    };

    let token = generate_token();
    app_state.store.set_user_token(user.id, Some(&token)).await?;
    info!("User {} logged in", user.id);

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    let next = safe_next(form.next.as_deref()).to_string();

    Ok((jar.add(cookie), Redirect::to(&next)).into_response())
}
