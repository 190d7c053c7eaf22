//! Response envelope.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Every response body, success or failure, is wrapped as `{ "data": ... }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Data<T: ToSchema + 'static> {
    pub data: T,
}

impl<T: ToSchema + 'static> Data<T> {
    pub(crate) fn new(data: T) -> Self {
        Self { data }
    }
}
