//! Shared fixtures for service tests that run against PostgreSQL.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
