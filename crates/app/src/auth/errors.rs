//! Auth service errors.

use sqlx::Error;
use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::errors::ErrorKind;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("session not found")]
    NotFound,

    #[error("session has an unknown role: {0}")]
    UnknownRole(String),

    #[error("guest session has no device id")]
    MissingDevice,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("deadline exceeded")]
    Timeout(#[from] Elapsed),
}

impl AuthServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound | Self::UnknownRole(_) | Self::MissingDevice => ErrorKind::Unauthorized,
            Self::Sql(_) => ErrorKind::Database,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
