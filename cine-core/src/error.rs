use thiserror::Error;

use crate::api::ApiError;
use crate::auth::AuthError;
use crate::session::StorageError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Rating must be between 1 and 10 (got {0})")]
    RatingOutOfRange(f32),
}

/// Errors surfaced by the details and profile services.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Session ID not found. Please log in again.")]
    SessionMissing,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}
