use axum::response::{IntoResponse, Redirect, Response};
use hyper::StatusCode;
use tracing::error;

use crate::routes::error_pages::{
    error_page, BAD_REQUEST_TEMPLATE, CSRF_FAILURE_TEMPLATE, NOT_FOUND_TEMPLATE, SERVER_ERROR_TEMPLATE,
};

use super::urls::login_url;

pub enum AppError {
    /// Missing entity, or one the requester may not see
    NotFound,
    /// Form submitted without a matching CSRF token
    CsrfFailure,
    /// Submitted body that could not be read in full, 400 or 413
    UnreadableBody(StatusCode),
    InternalServerError,
    /// Anonymous request to a page that needs a session, `next` is the
    /// path to come back to after login
    LoginRequired { next: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => error_page(NOT_FOUND_TEMPLATE, StatusCode::NOT_FOUND),
            AppError::CsrfFailure => error_page(CSRF_FAILURE_TEMPLATE, StatusCode::FORBIDDEN),
            AppError::UnreadableBody(status) => error_page(BAD_REQUEST_TEMPLATE, status),
            AppError::InternalServerError => {
                error_page(SERVER_ERROR_TEMPLATE, StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::LoginRequired { next } => Redirect::to(&login_url(&next)).into_response(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        error!("Database error : {e}");
        AppError::InternalServerError
    }
}
