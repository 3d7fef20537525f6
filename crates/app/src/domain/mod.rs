//! Game Rental Domain Concerns

pub mod catalog;
pub mod orders;
pub mod tracking;
pub mod users;
