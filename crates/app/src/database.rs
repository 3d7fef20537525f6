//! Database connection management

use std::str::FromStr;

use gamerental::ids::IdError;
use sqlx::{
    PgPool, Postgres, Transaction,
    postgres::{PgConnectOptions, PgPoolOptions},
};

/// Everything the console needs from one `PostgreSQL` connection.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction on the session connection.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Connect to `PostgreSQL` over a single connection.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

/// Parse a stored identifier, reporting failures as a decode error on `column`.
pub(crate) fn decode_id<T>(text: &str, column: &str) -> sqlx::Result<T>
where
    T: FromStr<Err = IdError>,
{
    text.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
