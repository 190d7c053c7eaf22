//! Fees service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as SqlErrorKind},
};
use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::{domain::fees::data::FeeScopeError, errors::ErrorKind, money::AmountError};

#[derive(Debug, Error)]
pub enum FeesServiceError {
    #[error("fee not found")]
    NotFound,

    #[error("no active fee for {0}")]
    FeeNotFound(String),

    #[error("an active fee already exists for this scope")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("only vendors and admins may quote fees")]
    Unauthorized,

    #[error(transparent)]
    InvalidScope(#[from] FeeScopeError),

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("fee request timed out")]
    Timeout(#[from] Elapsed),
}

impl FeesServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::DatabaseNoRecord,
            Self::FeeNotFound(_) => ErrorKind::FeeNotFound,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::InvalidReference
            | Self::MissingRequiredData
            | Self::InvalidData
            | Self::InvalidScope(_)
            | Self::InvalidAmount(_) => ErrorKind::InvalidRequest,
            Self::AlreadyExists | Self::Sql(_) => ErrorKind::Database,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }
}

impl From<Error> for FeesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(SqlErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(SqlErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(SqlErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(SqlErrorKind::CheckViolation) => Self::InvalidData,
            Some(SqlErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
