//! Order Records

use gamerental::ids::{OrderId, TrackingId};
use jiff::Timestamp;
use rust_decimal::Decimal;

/// Rental Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub login: String,
    pub game_count: u32,
    pub total_price: Decimal,
    pub ordered_at: Timestamp,
    pub due_at: Timestamp,
}

/// Games In Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub game_id: String,
    pub units: u32,
}

/// An order together with its tracking identifier and line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub tracking_id: Option<TrackingId>,
    pub items: Vec<OrderItemRecord>,
}

/// Outcome of a committed placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub tracking_id: TrackingId,
    pub game_count: u32,
    pub total_price: Decimal,
    pub ordered_at: Timestamp,
    pub due_at: Timestamp,
}
