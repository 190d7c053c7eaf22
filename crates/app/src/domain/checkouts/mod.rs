//! Checkouts
//!
//! Turns a shopper's active cart into an order: shipping details are resolved,
//! the submitted delivery and service fees are checked against the ledger, the
//! payment is compared with the computed total, and the order is written in the
//! same transaction that closes the cart.

pub mod data;
pub mod errors;
pub mod policy;
pub mod reconcile;
pub mod records;
mod repository;
pub mod service;

pub use errors::CheckoutsServiceError;
pub use service::*;
