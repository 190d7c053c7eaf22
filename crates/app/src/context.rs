//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        checkouts::{CheckoutsService, PgCheckoutsService},
        fees::{FeesService, PgFeesService},
        profiles::{PgProfilesService, ProfilesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub fees: Arc<dyn FeesService>,
    pub carts: Arc<dyn CartsService>,
    pub checkouts: Arc<dyn CheckoutsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Wire every service onto `db`.
    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        let profiles: Arc<dyn ProfilesService> = Arc::new(PgProfilesService::new(db.clone()));

        Self {
            fees: Arc::new(PgFeesService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            checkouts: Arc::new(PgCheckoutsService::new(db.clone(), profiles)),
            auth: Arc::new(PgAuthService::new(db.clone())),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        deadline: Duration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(&Db::with_deadline(pool, deadline)))
    }
}
