//! Game Rental
//!
//! Domain rules for the game-rental console: sequential order and tracking
//! identifiers, the rental cart and its totals, staff roles, and the order
//! placement policy. Nothing in this crate performs I/O.

pub mod cart;
pub mod ids;
pub mod orders;
pub mod roles;
