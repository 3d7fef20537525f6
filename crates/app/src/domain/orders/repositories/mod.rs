//! Order Repositories

mod identifiers;
mod items;
mod orders;
mod tracking;

pub(crate) use identifiers::PgIdentifiersRepository;
pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::PgOrdersRepository;
pub(crate) use tracking::PgOrderTrackingRepository;
