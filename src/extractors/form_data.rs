use std::collections::HashMap;

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequest, Multipart},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Form,
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use crate::utils::{
    app_error::AppError,
    forms::{RawForm, UploadedFile},
    token::{tokens_match, CSRF_COOKIE, CSRF_FIELD, CSRF_HEADER},
};

/// Submitted form of a POST request, `None` for any other method.
///
/// Every submission must carry the `csrftoken` cookie value, either in the
/// `X-CSRFToken` header or in the `csrfmiddlewaretoken` field.
pub struct FormData(pub Option<RawForm>);

#[async_trait]
impl<S> FromRequest<S, Body> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        if request.method() != Method::POST {
            return Ok(FormData(None));
        }

        let cookie_token = CookieJar::from_headers(request.headers())
            .get(CSRF_COOKIE)
            .map(|cookie| cookie.value().to_string());
        let header_token = request
            .headers()
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let form = if content_type.starts_with("multipart/form-data") {
            read_multipart(request, state).await?
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            match Form::<HashMap<String, String>>::from_request(request, state).await {
                Ok(Form(fields)) => RawForm {
                    fields,
                    files: HashMap::new(),
                },
                Err(e) => {
                    warn!("Unreadable form : {e}");
                    return Err(unreadable_body(e.status()));
                }
            }
        } else {
            // Nothing to read, the token can still come in the header
            RawForm::default()
        };

        let submitted = header_token.or_else(|| form.fields.get(CSRF_FIELD).cloned());
        match (cookie_token, submitted) {
            (Some(expected), Some(submitted)) if tokens_match(&expected, &submitted) => {
                Ok(FormData(Some(form)))
            }
            _ => {
                warn!("CSRF verification failed");
                Err(AppError::CsrfFailure)
            }
        }
    }
}

/// 413 stays 413, any other read failure is a 400
fn unreadable_body(status: StatusCode) -> AppError {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::UnreadableBody(status),
        _ => AppError::UnreadableBody(StatusCode::BAD_REQUEST),
    }
}

/// Reads every part of the body, a form is never returned half read.
async fn read_multipart<S: Send + Sync>(request: Request<Body>, state: &S) -> Result<RawForm, AppError> {
    let mut multipart = Multipart::from_request(request, state).await.map_err(|e| {
        warn!("Unreadable multipart form : {e}");
        unreadable_body(e.status())
    })?;

    let mut form = RawForm::default();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Error reading multipart field : {e}");
        unreadable_body(e.status())
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let file_name = field.file_name().map(str::to_string);
        let content = field.bytes().await.map_err(|e| {
            warn!("Error reading multipart field `{name}` : {e}");
            unreadable_body(e.status())
        })?;
        match file_name {
            Some(file_name) => {
                form.files.insert(name, UploadedFile { file_name, content });
            }
            None => {
                form.fields
                    .insert(name, String::from_utf8_lossy(&content).into_owned());
            }
        }
    }

    Ok(form)
}
