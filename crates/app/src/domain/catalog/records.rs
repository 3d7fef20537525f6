//! Catalog Records

use rust_decimal::Decimal;

/// Catalog Entry Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub game_id: String,
    pub name: String,
    pub genre: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
}
