//! Catalog Data

use rust_decimal::Decimal;

/// Which catalog rows to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogFilter {
    #[default]
    All,
    Genre(String),
    MaxPrice(Decimal),
}

/// Direction of the price ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceOrder {
    #[default]
    Ascending,
    Descending,
}

/// Catalog Listing Query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub filter: CatalogFilter,
    pub order: PriceOrder,
}

/// A single-field change to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogUpdate {
    Name(String),
    Genre(String),
    Price(Decimal),
    Description(String),
    ImageUrl(String),
}
