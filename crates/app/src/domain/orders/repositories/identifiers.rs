//! Identifier Allocation Repository

use gamerental::ids::{IdKind, OrderId, SequentialId, TrackingId};
use sqlx::{Postgres, Transaction, query, query_scalar};

use crate::domain::orders::errors::OrdersServiceError;

const LOCK_IDENTIFIERS_SQL: &str = include_str!("../sql/lock_identifiers.sql");
const MAX_ORDER_NUMBER_SQL: &str = include_str!("../sql/max_order_number.sql");
const MAX_TRACKING_NUMBER_SQL: &str = include_str!("../sql/max_tracking_number.sql");

/// Advisory lock key serializing identifier allocation across sessions.
const IDENTIFIER_LOCK_KEY: i64 = 0x6761_6d65_7265_6e74;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgIdentifiersRepository;

impl PgIdentifiersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Block until no other placement is allocating, holding the lock until
    /// the transaction ends.
    pub(crate) async fn lock(&self, tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
        query(LOCK_IDENTIFIERS_SQL)
            .bind(IDENTIFIER_LOCK_KEY)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn next_order_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<OrderId, OrdersServiceError> {
        Self::next(tx, MAX_ORDER_NUMBER_SQL).await
    }

    pub(crate) async fn next_tracking_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<TrackingId, OrdersServiceError> {
        Self::next(tx, MAX_TRACKING_NUMBER_SQL).await
    }

    async fn next<K: IdKind>(
        tx: &mut Transaction<'_, Postgres>,
        sql: &'static str,
    ) -> Result<SequentialId<K>, OrdersServiceError> {
        let max: Option<i64> = query_scalar(sql).fetch_one(&mut **tx).await?;

        let max = max
            .map(u64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "max_number".to_string(),
                source: Box::new(e),
            })?;

        Ok(SequentialId::after(max)?)
    }
}
