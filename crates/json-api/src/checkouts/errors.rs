//! Errors

use refill_app::domain::checkouts::CheckoutsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CheckoutsServiceError) -> ApiError {
    ApiError::from_service(error.kind(), &error)
}
