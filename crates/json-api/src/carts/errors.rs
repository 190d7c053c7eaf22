//! Errors

use refill_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    ApiError::from_service(error.kind(), &error)
}
