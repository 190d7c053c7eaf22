//! Fees Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{column_error, money_param, try_get_money},
    domain::{
        fees::{
            data::{FeeScope, NewFeeQuote},
            records::{FeeRates, FeeRecord, FeeStatus, FeeType, FeeUuid},
        },
        references::ProductUuid,
        regions::Region,
    },
};

const LOCK_FEE_SCOPE_SQL: &str = include_str!("sql/lock_fee_scope.sql");
const FIND_ACTIVE_FEE_SQL: &str = include_str!("sql/find_active_fee.sql");
const LOCK_ACTIVE_FEE_SQL: &str = include_str!("sql/lock_active_fee.sql");
const INACTIVATE_FEE_SQL: &str = include_str!("sql/inactivate_fee.sql");
const CREATE_FEE_SQL: &str = include_str!("sql/create_fee.sql");
const LIST_ACTIVE_FEES_BY_REGION_SQL: &str = include_str!("sql/list_active_fees_by_region.sql");
const LIST_ACTIVE_FEES_SQL: &str = include_str!("sql/list_active_fees.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFeesRepository;

impl PgFeesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Serialise writers of `scope` until the surrounding transaction ends.
    pub(crate) async fn lock_scope(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: &FeeScope,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_FEE_SCOPE_SQL)
            .bind(scope.lock_key())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_active_fee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: &FeeScope,
    ) -> Result<Option<FeeRecord>, sqlx::Error> {
        query_as::<Postgres, FeeRecord>(FIND_ACTIVE_FEE_SQL)
            .bind(scope.fee_type().as_str())
            .bind(scope.region().state())
            .bind(scope.region().lga())
            .bind(scope.product_uuid().map(ProductUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn lock_active_fee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: &FeeScope,
    ) -> Result<Option<FeeRecord>, sqlx::Error> {
        query_as::<Postgres, FeeRecord>(LOCK_ACTIVE_FEE_SQL)
            .bind(scope.fee_type().as_str())
            .bind(scope.region().state())
            .bind(scope.region().lga())
            .bind(scope.product_uuid().map(ProductUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn inactivate_fee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        fee: FeeUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INACTIVATE_FEE_SQL)
            .bind(fee.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_fee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        quote: &NewFeeQuote,
    ) -> Result<FeeRecord, sqlx::Error> {
        query_as::<Postgres, FeeRecord>(CREATE_FEE_SQL)
            .bind(quote.uuid.into_uuid())
            .bind(quote.scope.product_uuid().map(ProductUuid::into_uuid))
            .bind(quote.scope.region().state())
            .bind(quote.scope.region().lga())
            .bind(quote.scope.fee_type().as_str())
            .bind(money_param(quote.rates.cost_per_kg, "cost_per_kg")?)
            .bind(money_param(quote.rates.cost_per_qty, "cost_per_qty")?)
            .bind(money_param(quote.rates.amount, "amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_active_fees_by_region(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        region: &Region,
        fee_types: &[FeeType],
    ) -> Result<Vec<FeeRecord>, sqlx::Error> {
        let fee_types: Vec<String> = fee_types
            .iter()
            .map(|fee_type| fee_type.as_str().to_string())
            .collect();

        query_as::<Postgres, FeeRecord>(LIST_ACTIVE_FEES_BY_REGION_SQL)
            .bind(region.state())
            .bind(region.lga())
            .bind(fee_types)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_active_fees(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        region: Option<&Region>,
    ) -> Result<Vec<FeeRecord>, sqlx::Error> {
        query_as::<Postgres, FeeRecord>(LIST_ACTIVE_FEES_SQL)
            .bind(region.map(Region::state))
            .bind(region.map(Region::lga))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for FeeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let fee_type = row
            .try_get::<&str, _>("fee_type")?
            .parse::<FeeType>()
            .map_err(|source| column_error("fee_type", source))?;

        let status = row
            .try_get::<&str, _>("status")?
            .parse::<FeeStatus>()
            .map_err(|source| column_error("status", source))?;

        let region = Region::new(row.try_get("state")?, row.try_get("lga")?)
            .map_err(|source| column_error("state", source))?;

        let product = row
            .try_get::<Option<Uuid>, _>("product_uuid")?
            .map(ProductUuid::from_uuid);

        let scope = FeeScope::new(fee_type, region, product)
            .map_err(|source| column_error("product_uuid", source))?;

        Ok(Self {
            uuid: FeeUuid::from_uuid(row.try_get("uuid")?),
            scope,
            rates: FeeRates {
                cost_per_kg: try_get_money(row, "cost_per_kg")?,
                cost_per_qty: try_get_money(row, "cost_per_qty")?,
                amount: try_get_money(row, "amount")?,
            },
            status,
            status_changed_at: row
                .try_get::<SqlxTimestamp, _>("status_changed_at")?
                .to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
