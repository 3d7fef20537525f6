//! Order Tracking Repository

use gamerental::{
    ids::{OrderId, TrackingId},
    orders::TrackingDefaults,
};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Transaction, query};

const CREATE_TRACKING_SQL: &str = include_str!("../sql/create_tracking.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderTrackingRepository;

impl PgOrderTrackingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_tracking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tracking_id: TrackingId,
        order_id: OrderId,
        defaults: &TrackingDefaults,
        created_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_TRACKING_SQL)
            .bind(tracking_id.to_string())
            .bind(order_id.to_string())
            .bind(&defaults.status)
            .bind(&defaults.location)
            .bind(&defaults.courier)
            .bind(SqlxTimestamp::from(created_at))
            .bind(&defaults.comments)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
