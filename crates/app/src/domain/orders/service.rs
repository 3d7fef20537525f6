//! Orders service.
//!
//! Placement allocates both identifiers and performs every write inside one
//! transaction. Allocation is serialized through a transaction-scoped advisory
//! lock, so two consoles placing orders at the same moment never compute the
//! same next identifier.

use async_trait::async_trait;
use gamerental::{
    ids::OrderId,
    orders::{EmptyCartPolicy, PlacementPhase, TrackingDefaults},
};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, debug, info, warn};

use crate::{
    database::Db,
    domain::orders::{
        data::NewOrder,
        errors::OrdersServiceError,
        records::{OrderDetails, PlacedOrder},
        repositories::{
            PgIdentifiersRepository, PgOrderItemsRepository, PgOrderTrackingRepository,
            PgOrdersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    empty_cart_policy: EmptyCartPolicy,
    tracking_defaults: TrackingDefaults,
    identifiers: PgIdentifiersRepository,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    tracking: PgOrderTrackingRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            empty_cart_policy: EmptyCartPolicy::default(),
            tracking_defaults: TrackingDefaults::default(),
            identifiers: PgIdentifiersRepository::new(),
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            tracking: PgOrderTrackingRepository::new(),
        }
    }

    /// Decide what happens to carts without line items.
    #[must_use]
    pub fn with_empty_cart_policy(mut self, policy: EmptyCartPolicy) -> Self {
        self.empty_cart_policy = policy;
        self
    }

    async fn write_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let span = Span::current();

        debug!(phase = %PlacementPhase::Allocating, "allocating identifiers");

        self.identifiers.lock(tx).await?;

        let order_id = self.identifiers.next_order_id(tx).await?;
        let tracking_id = self.identifiers.next_tracking_id(tx).await?;

        span.record("order_id", tracing::field::display(order_id));
        span.record("tracking_id", tracing::field::display(tracking_id));

        debug!(phase = %PlacementPhase::Writing, "writing order");

        let record = self.orders.create_order(tx, order_id, order).await?;

        self.items
            .create_order_items(tx, order_id, order.cart.items())
            .await?;

        self.tracking
            .create_tracking(
                tx,
                tracking_id,
                order_id,
                &self.tracking_defaults,
                order.placed_at,
            )
            .await?;

        Ok(PlacedOrder {
            order_id,
            tracking_id,
            game_count: record.game_count,
            total_price: record.total_price,
            ordered_at: record.ordered_at,
            due_at: record.due_at,
        })
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, order),
        fields(
            login = %order.login,
            line_items = order.cart.items().len(),
            order_id = tracing::field::Empty,
            tracking_id = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(&self, order: NewOrder) -> Result<PlacedOrder, OrdersServiceError> {
        if !self.empty_cart_policy.permits(&order.cart) {
            return Err(OrdersServiceError::EmptyCart(self.empty_cart_policy));
        }

        let mut tx = self.db.begin().await?;

        match self.write_order(&mut tx, &order).await {
            Ok(placed) => {
                tx.commit().await?;

                info!(
                    phase = %PlacementPhase::Committed,
                    order_id = %placed.order_id,
                    tracking_id = %placed.tracking_id,
                    game_count = placed.game_count,
                    total_price = %placed.total_price,
                    "placed order"
                );

                Ok(placed)
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!(error = %rollback_error, "failed to roll back order placement");
                }

                warn!(phase = %PlacementPhase::RolledBack, %error, "order placement rolled back");

                Err(error)
            }
        }
    }

    async fn list_orders(
        &self,
        login: &str,
        limit: Option<u32>,
    ) -> Result<Vec<OrderId>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_order_ids(&mut tx, login, limit).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        login: &str,
        order_id: OrderId,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let key = self
            .orders
            .find_order_key(&mut tx, login, order_id)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let order = self.orders.get_order(&mut tx, login, &key).await?;
        let tracking_id = self.orders.get_tracking_id(&mut tx, &key).await?;
        let items = self.items.get_order_items(&mut tx, &key).await?;

        tx.commit().await?;

        Ok(OrderDetails {
            order,
            tracking_id,
            items,
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order for the cart, creating its tracking record.
    ///
    /// Either every row is written or none is.
    async fn place_order(&self, order: NewOrder) -> Result<PlacedOrder, OrdersServiceError>;

    /// Lists the user's order identifiers, newest first.
    async fn list_orders(
        &self,
        login: &str,
        limit: Option<u32>,
    ) -> Result<Vec<OrderId>, OrdersServiceError>;

    /// Retrieve one of the user's orders with its tracking id and line items.
    async fn get_order(
        &self,
        login: &str,
        order_id: OrderId,
    ) -> Result<OrderDetails, OrdersServiceError>;
}
