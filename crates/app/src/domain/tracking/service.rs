//! Tracking service.

use async_trait::async_trait;
use gamerental::ids::TrackingId;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::tracking::{
        data::TrackingUpdate, errors::TrackingServiceError, records::TrackingRecord,
        repository::PgTrackingRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgTrackingService {
    db: Db,
    repository: PgTrackingRepository,
}

impl PgTrackingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTrackingRepository::new(),
        }
    }
}

#[async_trait]
impl TrackingService for PgTrackingService {
    async fn tracking_exists(&self, tracking_id: TrackingId) -> Result<bool, TrackingServiceError> {
        let mut tx = self.db.begin().await?;

        let key = self
            .repository
            .find_tracking_key(&mut tx, tracking_id)
            .await?;

        tx.commit().await?;

        Ok(key.is_some())
    }

    async fn get_tracking(
        &self,
        login: &str,
        tracking_id: TrackingId,
    ) -> Result<TrackingRecord, TrackingServiceError> {
        let mut tx = self.db.begin().await?;

        let key = self
            .repository
            .find_tracking_key(&mut tx, tracking_id)
            .await?
            .ok_or(TrackingServiceError::NotFound)?;

        let tracking = self.repository.get_tracking(&mut tx, login, &key).await?;

        tx.commit().await?;

        Ok(tracking)
    }

    async fn update_tracking(
        &self,
        tracking_id: TrackingId,
        update: TrackingUpdate,
        updated_at: Timestamp,
    ) -> Result<TrackingRecord, TrackingServiceError> {
        let mut tx = self.db.begin().await?;

        let key = self
            .repository
            .find_tracking_key(&mut tx, tracking_id)
            .await?
            .ok_or(TrackingServiceError::NotFound)?;

        let updated = self
            .repository
            .update_tracking(&mut tx, &key, update, updated_at)
            .await?;

        tx.commit().await?;

        info!(tracking_id = %updated.tracking_id, status = %updated.status, "updated tracking");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait TrackingService: Send + Sync {
    /// Whether any tracking record carries this number, whoever owns its order.
    async fn tracking_exists(&self, tracking_id: TrackingId) -> Result<bool, TrackingServiceError>;

    /// Retrieve a tracking record belonging to one of the user's orders.
    async fn get_tracking(
        &self,
        login: &str,
        tracking_id: TrackingId,
    ) -> Result<TrackingRecord, TrackingServiceError>;

    /// Changes one field of a tracking record and stamps the update time.
    async fn update_tracking(
        &self,
        tracking_id: TrackingId,
        update: TrackingUpdate,
        updated_at: Timestamp,
    ) -> Result<TrackingRecord, TrackingServiceError>;
}
