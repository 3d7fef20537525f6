//! Cart
//!
//! The in-progress list of games an operator is assembling before an order is
//! placed. Totals are accumulated as entries are added and are never
//! re-derived from stored rows.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while adding an entry to the cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Catalog prices are never negative.
    #[error("game {0} has a negative price")]
    NegativePrice(String),

    /// The unit count no longer fits the stored column.
    #[error("too many copies in one order")]
    TooManyUnits,

    /// The running total overflowed.
    #[error("order total is too large")]
    PriceOverflow,

    /// The game is already in the cart at a different unit price.
    #[error("price of game {game_id} changed from {previous} to {current}")]
    PriceChanged {
        /// Catalog identifier of the game.
        game_id: String,
        /// Unit price of the existing line item.
        previous: Decimal,
        /// Unit price offered now.
        current: Decimal,
    },
}

/// One game within a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    game_id: String,
    units: u32,
    unit_price: Decimal,
}

impl LineItem {
    /// Catalog identifier of the game.
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Number of copies requested.
    pub fn units(&self) -> u32 {
        self.units
    }

    /// Catalog price per copy at the time the entry was added.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}

/// Result of offering an entry to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEntry {
    /// The entry was appended as a new line item.
    Added,

    /// The game was already in the cart and its units were increased.
    Merged,

    /// The quantity was zero or negative, so nothing changed.
    Skipped,
}

/// Rental cart with running totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
    game_count: u32,
    total_price: Decimal,
}

/// Largest unit count the `INTEGER` columns can hold.
const MAX_UNITS: u32 = i32::MAX.unsigned_abs();

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `quantity` copies of `game_id` at `unit_price`.
    ///
    /// Quantities of zero or below are accepted and ignored. Adding a game that
    /// is already in the cart increases the units of its existing line, which
    /// requires the same unit price.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the price is negative or differs from the
    /// existing line, or when a total overflows. The cart is left untouched in
    /// that case.
    pub fn add(
        &mut self,
        game_id: &str,
        quantity: i64,
        unit_price: Decimal,
    ) -> Result<CartEntry, CartError> {
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(CartError::NegativePrice(game_id.to_string()));
        }

        let Ok(units) = u32::try_from(quantity) else {
            if quantity <= 0 {
                return Ok(CartEntry::Skipped);
            }

            return Err(CartError::TooManyUnits);
        };

        if units == 0 {
            return Ok(CartEntry::Skipped);
        }

        let existing = self.items.iter().position(|item| item.game_id == game_id);

        if let Some(item) = existing.and_then(|index| self.items.get(index))
            && item.unit_price != unit_price
        {
            return Err(CartError::PriceChanged {
                game_id: game_id.to_string(),
                previous: item.unit_price,
                current: unit_price,
            });
        }

        let game_count = self
            .game_count
            .checked_add(units)
            .filter(|count| *count <= MAX_UNITS)
            .ok_or(CartError::TooManyUnits)?;

        let total_price = unit_price
            .checked_mul(Decimal::from(units))
            .and_then(|line| self.total_price.checked_add(line))
            .ok_or(CartError::PriceOverflow)?;

        let entry = match existing.and_then(|index| self.items.get_mut(index)) {
            Some(item) => {
                item.units += units;
                CartEntry::Merged
            }
            None => {
                self.items.push(LineItem {
                    game_id: game_id.to_string(),
                    units,
                    unit_price,
                });
                CartEntry::Added
            }
        };

        self.game_count = game_count;
        self.total_price = total_price;

        Ok(entry)
    }

    /// Line items in the order they were first added.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total copies across all line items.
    pub fn game_count(&self) -> u32 {
        self.game_count
    }

    /// Sum of units multiplied by unit price across all line items.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Whether the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
