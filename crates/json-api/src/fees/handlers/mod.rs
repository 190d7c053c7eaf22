//! Fee Handlers

pub(crate) mod index;
pub(crate) mod quote;
