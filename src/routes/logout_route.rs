use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use tracing::info;

use crate::{
    extractors::{auth_extractor::AuthUser, form_data::FormData},
    utils::{app_error::AppError, render::Page, token::SESSION_COOKIE},
    AppState,
};

#[derive(Serialize)]
pub struct LoggedOutContext {}

/// Only reachable with POST, so `FormData` always checks the CSRF token
pub async fn logout_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    jar: CookieJar,
    FormData(_): FormData,
) -> Result<Response, AppError> {
    if let Some(user) = auth_user {
        app_state.store.set_user_token(user.id, None).await?;
        info!("User {} logged out", user.id);
    }

    let mut cookie = Cookie::named(SESSION_COOKIE);
    cookie.set_path("/");

    Ok((
        jar.remove(cookie),
        Page::new("registration/logged_out.html", LoggedOutContext {}),
    )
        .into_response())
}
