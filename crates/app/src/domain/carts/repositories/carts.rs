//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::{AccountUuid, DeviceId, OwnerKey},
    database::{column_error, try_get_money},
    domain::carts::records::{CartRecord, CartStatus, CartUuid},
};

const ENSURE_ACTIVE_CART_SQL: &str = include_str!("../sql/ensure_active_cart.sql");
const FIND_ACTIVE_CART_SQL: &str = include_str!("../sql/find_active_cart.sql");
const LOCK_ACTIVE_CART_SQL: &str = include_str!("../sql/lock_active_cart.sql");
const LOCK_CART_SQL: &str = include_str!("../sql/lock_cart.sql");
const REFRESH_CART_TOTAL_SQL: &str = include_str!("../sql/refresh_cart_total.sql");
const INACTIVATE_CART_SQL: &str = include_str!("../sql/inactivate_cart.sql");

#[derive(Debug, Error)]
#[error("cart must belong to exactly one customer or device")]
struct AmbiguousOwner;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Create an active cart for `owner` unless one already exists.
    pub(crate) async fn ensure_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerKey,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let (customer, device) = owner_columns(owner);

        let rows_affected = query(ENSURE_ACTIVE_CART_SQL)
            .bind(cart.into_uuid())
            .bind(customer)
            .bind(device)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn find_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerKey,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        let (customer, device) = owner_columns(owner);

        query_as::<Postgres, CartRecord>(FIND_ACTIVE_CART_SQL)
            .bind(customer)
            .bind(device)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find and row-lock the owner's active cart for the rest of the transaction.
    pub(crate) async fn lock_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerKey,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        let (customer, device) = owner_columns(owner);

        query_as::<Postgres, CartRecord>(LOCK_ACTIVE_CART_SQL)
            .bind(customer)
            .bind(device)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerKey,
        cart: CartUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        let (customer, device) = owner_columns(owner);

        query_as::<Postgres, CartRecord>(LOCK_CART_SQL)
            .bind(cart.into_uuid())
            .bind(customer)
            .bind(device)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Recompute the stored total from the cart's current items.
    pub(crate) async fn refresh_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(REFRESH_CART_TOTAL_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn inactivate_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INACTIVATE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn owner_columns(owner: &OwnerKey) -> (Option<Uuid>, Option<&str>) {
    match owner {
        OwnerKey::Customer(customer) => (Some(customer.into_uuid()), None),
        OwnerKey::Device(device) => (None, Some(device.as_str())),
    }
}

fn owner_from_row(row: &PgRow) -> Result<OwnerKey, sqlx::Error> {
    let customer: Option<Uuid> = row.try_get("customer_uuid")?;
    let device: Option<&str> = row.try_get("device_id")?;

    match (customer, device.and_then(DeviceId::new)) {
        (Some(customer), None) => Ok(OwnerKey::Customer(AccountUuid::from_uuid(customer))),
        (None, Some(device)) => Ok(OwnerKey::Device(device)),
        _ => Err(column_error("customer_uuid", AmbiguousOwner)),
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<&str, _>("status")?
            .parse::<CartStatus>()
            .map_err(|source| column_error("status", source))?;

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner: owner_from_row(row)?,
            items: Vec::new(),
            total: try_get_money(row, "total")?,
            status,
            status_changed_at: row
                .try_get::<SqlxTimestamp, _>("status_changed_at")?
                .to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
