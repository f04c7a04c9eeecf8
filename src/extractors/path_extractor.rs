use axum::{
    async_trait,
    extract::{self, FromRequestParts},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::utils::app_error::AppError;

/// URL parameters. A segment that does not parse, such as a post id that
/// is not an integer, is answered like an unknown path.
pub struct Path<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(extract::Path(value)) => Ok(Path(value)),
            Err(e) => {
                info!("No match for {} : {e}", parts.uri);
                Err(AppError::NotFound)
            }
        }
    }
}
