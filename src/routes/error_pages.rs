use std::any::Any;

use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};
use hyper::StatusCode;
use serde::Serialize;
use tracing::{error, info};

use crate::utils::{app_error::AppError, render::Page};

pub const BAD_REQUEST_TEMPLATE: &str = "pages/400.html";
pub const NOT_FOUND_TEMPLATE: &str = "pages/404.html";
pub const CSRF_FAILURE_TEMPLATE: &str = "pages/403csrf.html";
pub const SERVER_ERROR_TEMPLATE: &str = "pages/500.html";

#[derive(Serialize)]
struct ErrorContext {
    status: u16,
}

pub fn error_page(template: &'static str, status: StatusCode) -> Response {
    Page::new(
        template,
        ErrorContext {
            status: status.as_u16(),
        },
    )
    .with_status(status)
    .into_response()
}

/// Fallback for unknown paths
pub async fn page_not_found(uri: Uri) -> AppError {
    info!("No route for {uri}");
    AppError::NotFound
}

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!("Handler panicked : {details}");
    AppError::InternalServerError.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panics_render_the_server_error_page() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unreadable_body_keeps_its_status() {
        let response = AppError::UnreadableBody(StatusCode::PAYLOAD_TOO_LARGE).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let page: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(page["template"], BAD_REQUEST_TEMPLATE);
        assert_eq!(page["context"]["status"], 413);
    }
}
