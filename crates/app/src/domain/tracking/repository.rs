//! Tracking Repository

use gamerental::ids::TrackingId;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::decode_id,
    domain::tracking::{data::TrackingUpdate, records::TrackingRecord},
};

const FIND_TRACKING_KEY_SQL: &str = include_str!("sql/find_tracking_key.sql");
const GET_TRACKING_SQL: &str = include_str!("sql/get_tracking.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const UPDATE_LOCATION_SQL: &str = include_str!("sql/update_location.sql");
const UPDATE_COURIER_SQL: &str = include_str!("sql/update_courier.sql");
const UPDATE_COMMENTS_SQL: &str = include_str!("sql/update_comments.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTrackingRepository;

impl PgTrackingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Resolve the stored key of the tracking record numbered like `tracking_id`.
    ///
    /// Older rows may pad the number with zeros, so rows are matched by their
    /// digits and an exact key wins.
    pub(crate) async fn find_tracking_key(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tracking_id: TrackingId,
    ) -> Result<Option<String>, sqlx::Error> {
        query_scalar(FIND_TRACKING_KEY_SQL)
            .bind(Decimal::from(tracking_id.number()))
            .bind(tracking_id.to_string())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch a tracking record, but only when its order belongs to `login`.
    pub(crate) async fn get_tracking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
        key: &str,
    ) -> Result<TrackingRecord, sqlx::Error> {
        query_as::<Postgres, TrackingRecord>(GET_TRACKING_SQL)
            .bind(key)
            .bind(login)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_tracking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        update: TrackingUpdate,
        updated_at: Timestamp,
    ) -> Result<TrackingRecord, sqlx::Error> {
        let (sql, value) = match update {
            TrackingUpdate::Status(value) => (UPDATE_STATUS_SQL, value),
            TrackingUpdate::Location(value) => (UPDATE_LOCATION_SQL, value),
            TrackingUpdate::Courier(value) => (UPDATE_COURIER_SQL, value),
            TrackingUpdate::Comments(value) => (UPDATE_COMMENTS_SQL, value),
        };

        query_as::<Postgres, TrackingRecord>(sql)
            .bind(key)
            .bind(value)
            .bind(SqlxTimestamp::from(updated_at))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TrackingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            tracking_id: decode_id(row.try_get("trackingid")?, "trackingid")?,
            order_id: decode_id(row.try_get("rentalorderid")?, "rentalorderid")?,
            status: row.try_get("status")?,
            location: row.try_get("currentlocation")?,
            courier: row.try_get("couriername")?,
            last_updated: row
                .try_get::<SqlxTimestamp, _>("lastupdatedate")?
                .to_jiff(),
            comments: row
                .try_get::<Option<String>, _>("additionalcomments")?
                .unwrap_or_default(),
        })
    }
}
