//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use crate::errors::ApiError;

/// Map request-parsing failures onto an invalid-request error.
pub(crate) trait ResultExt<T> {
    fn or_400(self, context: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_400(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::invalid_request(format!("{context}: {error}")))
    }
}
