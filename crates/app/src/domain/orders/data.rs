//! Orders Data

use gamerental::cart::Cart;
use jiff::Timestamp;

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub login: String,
    pub cart: Cart,
    pub placed_at: Timestamp,
}
