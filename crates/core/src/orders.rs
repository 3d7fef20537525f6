//! Orders
//!
//! Rules shared by every placement: how long a rental lasts, what a fresh
//! tracking record looks like and whether a cart without line items may be
//! placed at all.

use std::{fmt::Display, str::FromStr};

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

use crate::cart::Cart;

/// Time between placing an order and its due date.
pub const RENTAL_PERIOD: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Due date of an order placed at `ordered_at`.
///
/// Saturates at the largest representable timestamp.
pub fn due_date(ordered_at: Timestamp) -> Timestamp {
    ordered_at
        .checked_add(RENTAL_PERIOD)
        .unwrap_or(Timestamp::MAX)
}

/// Values written into a tracking record when its order is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingDefaults {
    /// Initial shipping status.
    pub status: String,

    /// Where the order starts out.
    pub location: String,

    /// Courier, unknown until dispatch.
    pub courier: String,

    /// Free-form comments.
    pub comments: String,
}

impl Default for TrackingDefaults {
    fn default() -> Self {
        Self {
            status: "Order Processing".to_string(),
            location: "home office".to_string(),
            courier: "TBD".to_string(),
            comments: String::new(),
        }
    }
}

/// What to do with a cart that has no line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyCartPolicy {
    /// Place the order anyway, with zero games and a zero total.
    #[default]
    Allow,

    /// Refuse to place the order.
    Reject,
}

/// Error returned when an empty-cart policy name is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown empty cart policy {0:?}; expected allow or reject")]
pub struct EmptyCartPolicyParseError(pub String);

impl EmptyCartPolicy {
    /// Whether `cart` may be placed under this policy.
    pub fn permits(self, cart: &Cart) -> bool {
        match self {
            EmptyCartPolicy::Allow => true,
            EmptyCartPolicy::Reject => !cart.is_empty(),
        }
    }
}

impl Display for EmptyCartPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EmptyCartPolicy::Allow => "allow",
            EmptyCartPolicy::Reject => "reject",
        })
    }
}

impl FromStr for EmptyCartPolicy {
    type Err = EmptyCartPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(EmptyCartPolicy::Allow),
            "reject" => Ok(EmptyCartPolicy::Reject),
            _ => Err(EmptyCartPolicyParseError(s.to_string())),
        }
    }
}

/// Stages a single placement moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPhase {
    /// The operator is filling the cart.
    Collecting,

    /// New order and tracking identifiers are being taken.
    Allocating,

    /// Header, line items and tracking record are being inserted.
    Writing,

    /// Every write is durable.
    Committed,

    /// Nothing from the attempt was kept.
    RolledBack,
}

impl Display for PlacementPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PlacementPhase::Collecting => "collecting",
            PlacementPhase::Allocating => "allocating",
            PlacementPhase::Writing => "writing",
            PlacementPhase::Committed => "committed",
            PlacementPhase::RolledBack => "rolled back",
        })
    }
}
