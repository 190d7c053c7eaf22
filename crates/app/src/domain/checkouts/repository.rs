//! Checkouts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::{
    auth::AccountUuid,
    database::{column_error, money_param, try_get_money},
    domain::{
        carts::records::CartUuid,
        checkouts::{
            data::NewCheckout,
            records::{CheckoutItem, CheckoutRecord, CheckoutStatus, CheckoutUuid, ShippingInfo},
        },
        regions::Region,
    },
};

const CREATE_CHECKOUT_SQL: &str = include_str!("sql/create_checkout.sql");
const GET_CHECKOUT_SQL: &str = include_str!("sql/get_checkout.sql");
const LOCK_CHECKOUT_SQL: &str = include_str!("sql/lock_checkout.sql");
const UPDATE_CHECKOUT_STATUS_SQL: &str = include_str!("sql/update_checkout_status.sql");
const LIST_CHECKOUTS_SQL: &str = include_str!("sql/list_checkouts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCheckoutsRepository;

impl PgCheckoutsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_checkout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        checkout: &NewCheckout,
    ) -> Result<CheckoutRecord, sqlx::Error> {
        query_as::<Postgres, CheckoutRecord>(CREATE_CHECKOUT_SQL)
            .bind(checkout.uuid.into_uuid())
            .bind(checkout.customer_uuid.into_uuid())
            .bind(checkout.cart_uuid.into_uuid())
            .bind(Json(&checkout.items))
            .bind(money_param(checkout.cart_total, "cart_total")?)
            .bind(&checkout.shipping.name)
            .bind(&checkout.shipping.phone)
            .bind(&checkout.shipping.email)
            .bind(&checkout.shipping.address)
            .bind(checkout.shipping.region.state())
            .bind(checkout.shipping.region.lga())
            .bind(&checkout.payment_method)
            .bind(money_param(checkout.amount_paid, "amount_paid")?)
            .bind(money_param(checkout.delivery_fee, "delivery_fee")?)
            .bind(money_param(checkout.service_fee, "service_fee")?)
            .bind(money_param(checkout.total, "total")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_checkout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        checkout: CheckoutUuid,
    ) -> Result<Option<CheckoutRecord>, sqlx::Error> {
        query_as::<Postgres, CheckoutRecord>(GET_CHECKOUT_SQL)
            .bind(checkout.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn lock_checkout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        checkout: CheckoutUuid,
    ) -> Result<Option<CheckoutRecord>, sqlx::Error> {
        query_as::<Postgres, CheckoutRecord>(LOCK_CHECKOUT_SQL)
            .bind(checkout.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_checkout_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        checkout: CheckoutUuid,
        status: CheckoutStatus,
    ) -> Result<CheckoutRecord, sqlx::Error> {
        query_as::<Postgres, CheckoutRecord>(UPDATE_CHECKOUT_STATUS_SQL)
            .bind(checkout.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// All checkouts, or only those of `customer`, newest first.
    pub(crate) async fn list_checkouts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: Option<AccountUuid>,
    ) -> Result<Vec<CheckoutRecord>, sqlx::Error> {
        query_as::<Postgres, CheckoutRecord>(LIST_CHECKOUTS_SQL)
            .bind(customer.map(AccountUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<&str, _>("status")?
            .parse::<CheckoutStatus>()
            .map_err(|source| column_error("status", source))?;

        let region = Region::new(row.try_get("state")?, row.try_get("lga")?)
            .map_err(|source| column_error("state", source))?;

        let Json(items) = row.try_get::<Json<Vec<CheckoutItem>>, _>("items")?;

        Ok(Self {
            uuid: CheckoutUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: AccountUuid::from_uuid(row.try_get("customer_uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            items,
            cart_total: try_get_money(row, "cart_total")?,
            shipping: ShippingInfo {
                name: row.try_get("recipient_name")?,
                phone: row.try_get("recipient_phone")?,
                email: row.try_get("recipient_email")?,
                address: row.try_get("recipient_address")?,
                region,
            },
            payment_method: row.try_get("payment_method")?,
            amount_paid: try_get_money(row, "amount_paid")?,
            delivery_fee: try_get_money(row, "delivery_fee")?,
            service_fee: try_get_money(row, "service_fee")?,
            total: try_get_money(row, "total")?,
            status,
            status_changed_at: row
                .try_get::<SqlxTimestamp, _>("status_changed_at")?
                .to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
