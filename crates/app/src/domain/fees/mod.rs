//! Fee ledger

pub mod data;
pub mod errors;
pub mod policy;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::FeesServiceError;
pub use service::*;
