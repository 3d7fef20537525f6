//! App Context

use std::sync::Arc;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

use crate::{
    cli::AppSettings,
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        orders::{OrdersService, PgOrdersService},
        tracking::{PgTrackingService, TrackingService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrdersService>,
    pub tracking: Arc<dyn TrackingService>,
}

impl AppContext {
    /// Build application context over a single database connection.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn connect(
        options: PgConnectOptions,
        settings: &AppSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(options)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(&Db::new(pool), settings))
    }

    #[must_use]
    pub fn from_db(db: &Db, settings: &AppSettings) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            orders: Arc::new(
                PgOrdersService::new(db.clone())
                    .with_empty_cart_policy(settings.empty_cart_policy),
            ),
            tracking: Arc::new(PgTrackingService::new(db.clone())),
        }
    }
}
