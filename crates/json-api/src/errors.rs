//! HTTP error responses.
//!
//! Service errors are classified by [`ErrorKind`]; this module turns that
//! classification into a status code and an enveloped body carrying a stable
//! code, a message and a reference that ties the response to the server log.

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};

use salvo::{
    http::StatusCode,
    oapi::{self, Components, Content, EndpointOutRegister, Operation, ToSchema},
    prelude::{Json, Response, Scribe},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use refill_app::errors::ErrorKind;

use crate::envelope::Data;

/// Error payload returned inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable description
    pub message: String,

    /// Opaque identifier for support lookups
    pub reference: Uuid,
}

/// An error on its way to the client.
#[derive(Debug)]
pub(crate) struct ApiError {
    kind: ErrorKind,
    message: String,
    reference: Uuid,
}

impl ApiError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            reference: Uuid::now_v7(),
        }
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub(crate) fn internal() -> Self {
        Self::new(ErrorKind::Database, "internal server error")
    }

    /// Classify and log a service failure.
    ///
    /// Server-side failures are logged with their source chain and answered
    /// with a generic message; caller errors keep the service's message.
    pub(crate) fn from_service<E>(kind: ErrorKind, error: &E) -> Self
    where
        E: StdError,
    {
        let reference = Uuid::now_v7();

        let message = match kind {
            ErrorKind::Timeout => "request deadline exceeded".to_string(),
            ErrorKind::Database => "internal server error".to_string(),
            _ => error.to_string(),
        };

        if kind.is_internal() {
            error!(
                %reference,
                code = kind.code(),
                error = %error,
                source = ?error.source().map(ToString::to_string),
                "request failed"
            );
        } else {
            info!(%reference, code = kind.code(), error = %error, "request rejected");
        }

        Self {
            kind,
            message,
            reference,
        }
    }

    pub(crate) fn status_code(&self) -> StatusCode {
        status_for(self.kind)
    }

    fn into_body(self) -> ErrorBody {
        ErrorBody {
            code: self.kind.code().to_string(),
            message: self.message,
            reference: self.reference,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.reference, self.message)
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Database => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::DatabaseNoRecord => StatusCode::NOT_FOUND,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::InvalidRequest
        | ErrorKind::AmountPaid
        | ErrorKind::InvalidDeliveryFee
        | ErrorKind::InvalidServiceFee
        | ErrorKind::CheckoutStatus
        | ErrorKind::FeeNotFound
        | ErrorKind::NoActiveCart
        | ErrorKind::InvalidQuantity => StatusCode::BAD_REQUEST,
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status_code());
        res.render(Json(Data::new(self.into_body())));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Invalid request"),
            (StatusCode::UNAUTHORIZED, "Missing or insufficient credentials"),
            (StatusCode::NOT_FOUND, "Record not found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            (StatusCode::GATEWAY_TIMEOUT, "Request deadline exceeded"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description).add_content(
                    "application/json",
                    Content::new(Data::<ErrorBody>::to_schema(components)),
                ),
            );
        }
    }
}
