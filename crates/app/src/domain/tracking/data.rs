//! Tracking Data

/// A single-field change to a tracking record.
///
/// Every change also refreshes the record's last update time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingUpdate {
    Status(String),
    Location(String),
    Courier(String),
    Comments(String),
}
