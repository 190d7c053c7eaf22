//! Shopper profiles
//!
//! Buyers and guests keep their delivery details in separate tables; checkout
//! reads them through [`ProfilesService`] when an order is for the caller.

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProfilesServiceError;
pub use service::*;
