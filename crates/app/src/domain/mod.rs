//! Marketplace domain concerns

pub mod carts;
pub mod checkouts;
pub mod fees;
pub mod profiles;
pub mod references;
pub mod regions;
