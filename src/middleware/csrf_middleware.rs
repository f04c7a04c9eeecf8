use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::utils::token::{generate_token, CSRF_COOKIE};

/// Hands out a `csrftoken` cookie to clients that do not have one yet.
/// The token itself is checked by the `FormData` extractor.
pub async fn csrf_cookie_middleware(
    jar: CookieJar,
    request: Request<Body>,
    next: Next<Body>,
) -> Response {
    let response = next.run(request).await;
    if jar.get(CSRF_COOKIE).is_some() {
        return response;
    }

    let cookie = Cookie::build(CSRF_COOKIE, generate_token())
        .path("/")
        .same_site(SameSite::Lax)
        .finish();
    (jar.add(cookie), response).into_response()
}
