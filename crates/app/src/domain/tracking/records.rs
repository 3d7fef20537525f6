//! Tracking Records

use gamerental::ids::{OrderId, TrackingId};
use jiff::Timestamp;

/// Tracking Info Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingRecord {
    pub tracking_id: TrackingId,
    pub order_id: OrderId,
    pub status: String,
    pub location: String,
    pub courier: String,
    pub last_updated: Timestamp,
    pub comments: String,
}
