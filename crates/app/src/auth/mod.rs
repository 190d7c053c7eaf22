//! Caller identity resolution.
//!
//! Sessions are issued elsewhere; this module only resolves a bearer token
//! into the [`Caller`] on whose behalf a request runs.

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
