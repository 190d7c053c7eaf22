//! Database connection management

use std::{error::Error as StdError, future::Future, time::Duration};

use sqlx::{
    PgPool, Postgres, Row, Transaction,
    migrate::MigrateError,
    postgres::{PgPoolOptions, PgRow},
};
use tokio::time::{error::Elapsed, timeout};

use crate::money::Money;

/// Deadline applied to a service call when none is configured.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    deadline: Duration,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self::with_deadline(pool, DEFAULT_DEADLINE)
    }

    #[must_use]
    pub fn with_deadline(pool: PgPool, deadline: Duration) -> Self {
        Self { pool, deadline }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction.
    ///
    /// Dropping the transaction without committing rolls it back, which is how
    /// every failed or timed-out service call discards its partial writes.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Run `operation` under the request deadline.
    pub async fn within_deadline<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<Elapsed>,
    {
        timeout(self.deadline, operation).await?
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply pending migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Wrap a conversion failure for `column` as a decode error.
pub(crate) fn column_error<E>(column: &str, source: E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

/// Read a `BIGINT` minor-unit column as [`Money`].
pub(crate) fn try_get_money(row: &PgRow, column: &str) -> Result<Money, sqlx::Error> {
    let minor: i64 = row.try_get(column)?;

    Money::try_from(minor).map_err(|source| column_error(column, source))
}

/// Convert [`Money`] into the `BIGINT` bound for `column`.
pub(crate) fn money_param(amount: Money, column: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|source| column_error(column, source))
}
