//! Errors

use refill_app::domain::fees::FeesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: FeesServiceError) -> ApiError {
    ApiError::from_service(error.kind(), &error)
}
