use axum::{
    response::{IntoResponse, Response},
    Json,
};
use hyper::StatusCode;
use serde::Serialize;

/// A rendered page: the template to use and the context to fill it with.
#[derive(Serialize)]
pub struct Page<T> {
    template: &'static str,
    context: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> Page<T> {
    pub fn new(template: &'static str, context: T) -> Self {
        Self {
            template,
            context,
            status: StatusCode::OK,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
