//! Profiles Repository

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    auth::AccountUuid,
    database::column_error,
    domain::{profiles::records::Profile, regions::Region},
};

const GET_BUYER_PROFILE_SQL: &str = include_str!("sql/get_buyer_profile.sql");
const GET_GUEST_PROFILE_SQL: &str = include_str!("sql/get_guest_profile.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgProfilesRepository {
    pool: PgPool,
}

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn get_buyer_profile(
        &self,
        account: AccountUuid,
    ) -> Result<Option<Profile>, sqlx::Error> {
        query_as::<Postgres, Profile>(GET_BUYER_PROFILE_SQL)
            .bind(account.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn get_guest_profile(
        &self,
        account: AccountUuid,
    ) -> Result<Option<Profile>, sqlx::Error> {
        query_as::<Postgres, Profile>(GET_GUEST_PROFILE_SQL)
            .bind(account.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Profile {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let region = Region::new(row.try_get("state")?, row.try_get("lga")?)
            .map_err(|source| column_error("state", source))?;

        Ok(Self {
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            address: row.try_get("address")?,
            region,
        })
    }
}
