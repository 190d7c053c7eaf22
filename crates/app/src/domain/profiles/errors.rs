//! Profiles service errors.

use sqlx::Error;
use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::errors::ErrorKind;

#[derive(Debug, Error)]
pub enum ProfilesServiceError {
    #[error("profile not found")]
    NotFound,

    #[error("only buyers and guests have shopping profiles")]
    Unauthorized,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("profile request timed out")]
    Timeout(#[from] Elapsed),
}

impl ProfilesServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::DatabaseNoRecord,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Sql(_) => ErrorKind::Database,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }
}

impl From<Error> for ProfilesServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
