//! Carts

pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
