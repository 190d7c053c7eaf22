//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{column_error, money_param, try_get_money},
    domain::{
        carts::{
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid, CartUuid},
        },
        references::{ProductUuid, VendorUuid},
        regions::Region,
    },
    money::{Money, Weight},
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const LOCK_CART_ITEM_SQL: &str = include_str!("../sql/lock_cart_item.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &NewCartItem,
        cost: Money,
    ) -> Result<CartItemRecord, sqlx::Error> {
        let weight_grams = item
            .basis
            .weight()
            .map(|weight| i64::try_from(weight.grams()))
            .transpose()
            .map_err(|source| column_error("weight_grams", source))?;

        let quantity = i32::try_from(item.basis.quantity())
            .map_err(|source| column_error("quantity", source))?;

        query_as::<Postgres, CartItemRecord>(CREATE_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(&item.category)
            .bind(item.vendor_uuid.into_uuid())
            .bind(item.region.state())
            .bind(item.region.lga())
            .bind(weight_grams)
            .bind(quantity)
            .bind(money_param(cost, "cost")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LOCK_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_item_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
        quantity: u32,
        cost: Money,
    ) -> Result<CartItemRecord, sqlx::Error> {
        let quantity =
            i32::try_from(quantity).map_err(|source| column_error("quantity", source))?;

        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .bind(quantity)
            .bind(money_param(cost, "cost")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let region = Region::new(row.try_get("state")?, row.try_get("lga")?)
            .map_err(|source| column_error("state", source))?;

        let weight = row
            .try_get::<Option<i64>, _>("weight_grams")?
            .map(|grams| {
                u64::try_from(grams)
                    .map_err(|source| column_error("weight_grams", source))
                    .and_then(|grams| {
                        Weight::from_grams(grams)
                            .map_err(|source| column_error("weight_grams", source))
                    })
            })
            .transpose()?;

        let quantity = u32::try_from(row.try_get::<i32, _>("quantity")?)
            .map_err(|source| column_error("quantity", source))?;

        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            category: row.try_get("category")?,
            vendor_uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
            region,
            weight,
            quantity,
            cost: try_get_money(row, "cost")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
