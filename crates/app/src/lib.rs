//! Cart, fee ledger and checkout services for the refill marketplace.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod errors;
pub mod money;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
