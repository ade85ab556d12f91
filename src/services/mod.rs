//! Pure handler logic shared by the HTTP routes.

use thiserror::Error;

use crate::forms::FieldErrors;
use crate::repository::errors::RepositoryError;

pub mod api;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Entity not found")]
    NotFound,

    #[error("Form validation failed")]
    Validation(FieldErrors),

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}
