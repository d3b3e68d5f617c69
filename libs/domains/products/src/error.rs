use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

use crate::lookup::LookupKey;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with {key} {term} not found")]
    NotFound { key: LookupKey, term: String },

    /// Carries the database's constraint detail
    #[error("{0}")]
    UniqueConflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unexpected storage error: {0}")]
    UnexpectedStorage(String),

    #[error("Seed invariant violated: {0}")]
    SeedInvariantViolation(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn not_found_id(id: Uuid) -> Self {
        ProductError::NotFound {
            key: LookupKey::Id,
            term: id.to_string(),
        }
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => ProductError::UniqueConflict(detail),
            _ => ProductError::UnexpectedStorage(err.to_string()),
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound { .. } => AppError::NotFound(err.to_string()),
            ProductError::UniqueConflict(detail) => AppError::Conflict(detail),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::UnexpectedStorage(detail) => AppError::InternalServerError(detail),
            ProductError::SeedInvariantViolation(detail) => AppError::SeedInvariant(detail),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
