use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::{
    models::user::User,
    utils::{app_error::AppError, token::SESSION_COOKIE},
    AppState,
};

/// The requester, resolved from the session cookie. `None` when anonymous.
pub struct AuthUser(pub Option<Arc<User>>);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let cookies = CookieJar::from_headers(&parts.headers);
        let token = match cookies.get(SESSION_COOKIE) {
            Some(token) if !token.value().is_empty() => token.value().to_string(),
            _ => return Ok(AuthUser(None)),
        };
        let user = app_state.store.find_user_by_token(&token).await?;
        Ok(AuthUser(user.map(Arc::new)))
    }
}

/// The requester of a page that needs a session. Anonymous requests are
/// sent to the login page, which brings them back to the same path and query.
pub struct LoginRequired(pub Arc<User>);

#[async_trait]
impl<S> FromRequestParts<S> for LoginRequired
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await? {
            AuthUser(Some(user)) => Ok(LoginRequired(user)),
            AuthUser(None) => Err(AppError::LoginRequired {
                next: parts
                    .uri
                    .path_and_query()
                    .map_or_else(|| parts.uri.path().to_string(), ToString::to_string),
            }),
        }
    }
}
