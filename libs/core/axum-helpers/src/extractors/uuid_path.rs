//! UUID path parameter extractor.

use crate::errors::{AppError, ErrorCode, error_response};
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Parses the single path parameter as a UUID.
///
/// ```ignore
/// async fn remove(UuidPath(id): UuidPath) -> String {
///     format!("Removing {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", delete(remove));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        match Uuid::parse_str(&id) {
            Ok(uuid) => Ok(UuidPath(uuid)),
            Err(_) => Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid UUID: {}", id),
                ErrorCode::InvalidUuid,
            )),
        }
    }
}
