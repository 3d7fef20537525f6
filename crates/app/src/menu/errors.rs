//! Menu flow errors.

use std::error::Error as StdError;

use gamerental::{cart::CartError, roles::AccessDenied};
use thiserror::Error;

use crate::{
    domain::{
        catalog::CatalogServiceError, orders::OrdersServiceError, tracking::TrackingServiceError,
        users::UsersServiceError,
    },
    terminal::InputError,
};

/// Anything that ends a single menu flow early.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    #[error(transparent)]
    Users(#[from] UsersServiceError),

    #[error(transparent)]
    Catalog(#[from] CatalogServiceError),

    #[error(transparent)]
    Orders(#[from] OrdersServiceError),

    #[error(transparent)]
    Tracking(#[from] TrackingServiceError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Render an error together with its chain of causes.
pub(crate) fn describe(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
