//! Order flows

use gamerental::{ids::OrderId, orders::PlacementPhase, roles::Capability};
use jiff::Timestamp;
use tracing::debug;

use crate::{
    context::AppContext,
    domain::orders::{OrdersServiceError, data::NewOrder},
    menu::{
        cart::build_cart,
        errors::{FlowError, describe},
        render,
    },
    session::Session,
    terminal::{Terminal, prompt_parsed},
};

/// Number of orders shown by the recent orders view.
pub(crate) const RECENT_ORDERS: u32 = 5;

/// Build a cart and place it as one order.
///
/// Placement failures are reported to the operator here rather than returned.
pub(crate) async fn place_order(
    ctx: &AppContext,
    session: &Session,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    session.require(Capability::RentGames)?;

    terminal.say("---ORDER PLACEMENT---");

    debug!(phase = %PlacementPhase::Collecting, login = session.login(), "building cart");

    let cart = build_cart(ctx.catalog.as_ref(), terminal).await?;

    let order = NewOrder {
        login: session.login().to_string(),
        cart,
        placed_at: Timestamp::now(),
    };

    match ctx.orders.place_order(order).await {
        Ok(placed) => {
            terminal.say(&format!(
                "Rental Order #{} placed, with Tracking ID #{} has successfully been placed.",
                placed.order_id.number(),
                placed.tracking_id.number()
            ));
            terminal.say(&format!(
                "Order total: ${:.2} for {} games.",
                placed.total_price, placed.game_count
            ));
        }
        Err(OrdersServiceError::EmptyCart(_)) => {
            terminal.say("Your cart is empty, no order was placed.");
        }
        Err(error) => {
            terminal.warn(&format!("Order failed: {}", describe(&error)));
            terminal.warn("System rollback, no changes made.");
        }
    }

    Ok(())
}

/// List the operator's order numbers, newest first.
pub(crate) async fn view_orders(
    ctx: &AppContext,
    session: &Session,
    terminal: &mut dyn Terminal,
    limit: Option<u32>,
) -> Result<(), FlowError> {
    let order_ids = ctx.orders.list_orders(session.login(), limit).await?;

    if order_ids.is_empty() {
        terminal.say("You have no order history.");

        return Ok(());
    }

    match limit {
        Some(limit) => terminal.say(&format!("Your {limit} most recent orders:")),
        None => terminal.say("Your order history:"),
    }

    for order_id in order_ids {
        terminal.say(&format!("- #{}", order_id.number()));
    }

    Ok(())
}

pub(crate) async fn view_order_info(
    ctx: &AppContext,
    session: &Session,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    let number: u64 = prompt_parsed(
        terminal,
        "Enter the ID # of the order you'd like to view: ",
        "order number",
    )
    .await?;

    let details = match ctx
        .orders
        .get_order(session.login(), OrderId::from_number(number))
        .await
    {
        Ok(details) => details,
        Err(OrdersServiceError::NotFound) => {
            terminal.say("Order not found or does not belong to you.");

            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    let tracking = details
        .tracking_id
        .map_or_else(|| "none".to_string(), |id| id.number().to_string());

    terminal.say("Order details:");
    terminal.say(&format!("- Order Timestamp: {}", details.order.ordered_at));
    terminal.say(&format!("- Due Date: {}", details.order.due_at));
    terminal.say(&format!("- Total Price: ${:.2}", details.order.total_price));
    terminal.say(&format!("- Tracking ID: {tracking}"));

    if details.items.is_empty() {
        terminal.say("No games found for this order.");
    } else {
        terminal.say("Games in this order:");
        terminal.say(&render::order_items(&details.items));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use gamerental::{
        ids::TrackingId,
        orders::{EmptyCartPolicy, due_date},
        roles::Role,
    };
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        domain::orders::records::{OrderDetails, OrderItemRecord, OrderRecord, PlacedOrder},
        test::{
            helpers::{Mocks, game},
            terminal::ScriptedTerminal,
        },
    };

    use super::*;

    fn session() -> Session {
        Session::new("alice", Role::Customer)
    }

    #[tokio::test]
    async fn placed_order_reports_identifiers_and_totals() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .catalog
            .expect_get_game()
            .return_once(|game_id| Ok(game(game_id, "Chess", dec!(9.99))));

        mocks
            .orders
            .expect_place_order()
            .once()
            .withf(|order| {
                order.login == "alice"
                    && order.cart.game_count() == 2
                    && order.cart.total_price() == dec!(19.98)
            })
            .return_once(|order| {
                Ok(PlacedOrder {
                    order_id: OrderId::from_number(3),
                    tracking_id: TrackingId::from_number(8),
                    game_count: order.cart.game_count(),
                    total_price: order.cart.total_price(),
                    ordered_at: order.placed_at,
                    due_at: order.placed_at,
                })
            });

        let ctx = mocks.into_context();
        let mut terminal = ScriptedTerminal::new(["G1", "2", "n"]);

        place_order(&ctx, &session(), &mut terminal).await?;

        assert!(
            terminal.showed("Rental Order #3 placed, with Tracking ID #8"),
            "unexpected output:\n{}",
            terminal.transcript()
        );
        assert!(terminal.showed("Order total: $19.98 for 2 games."));

        Ok(())
    }

    #[tokio::test]
    async fn failed_placement_reports_rollback() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .catalog
            .expect_get_game()
            .return_once(|game_id| Ok(game(game_id, "Chess", dec!(9.99))));

        mocks
            .orders
            .expect_place_order()
            .return_once(|_| Err(OrdersServiceError::InvalidReference));

        let ctx = mocks.into_context();
        let mut terminal = ScriptedTerminal::new(["G1", "1", "n"]);

        place_order(&ctx, &session(), &mut terminal).await?;

        assert!(terminal.showed("the order refers to an unknown user or game"));
        assert!(terminal.showed("System rollback, no changes made."));

        Ok(())
    }

    #[tokio::test]
    async fn refused_empty_cart_is_explained() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .catalog
            .expect_get_game()
            .return_once(|game_id| Ok(game(game_id, "Chess", dec!(9.99))));

        mocks
            .orders
            .expect_place_order()
            .withf(|order| order.cart.is_empty())
            .return_once(|_| Err(OrdersServiceError::EmptyCart(EmptyCartPolicy::Reject)));

        let ctx = mocks.into_context();
        let mut terminal = ScriptedTerminal::new(["G1", "0", "n"]);

        place_order(&ctx, &session(), &mut terminal).await?;

        assert!(terminal.showed("Your cart is empty, no order was placed."));
        assert!(!terminal.showed("System rollback"));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_quantity_places_nothing() {
        let mut mocks = Mocks::new();

        mocks
            .catalog
            .expect_get_game()
            .return_once(|game_id| Ok(game(game_id, "Chess", dec!(9.99))));

        mocks.orders.expect_place_order().never();

        let ctx = mocks.into_context();
        let mut terminal = ScriptedTerminal::new(["G1", "lots"]);

        let result = place_order(&ctx, &session(), &mut terminal).await;

        assert!(
            matches!(result, Err(FlowError::Input(_))),
            "expected input error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn recent_orders_are_listed_by_number() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(|login, limit| login == "alice" && *limit == Some(RECENT_ORDERS))
            .return_once(|_, _| Ok(vec![OrderId::from_number(12), OrderId::from_number(9)]));

        let ctx = mocks.into_context();
        let mut terminal = ScriptedTerminal::new(Vec::<String>::new());

        view_orders(&ctx, &session(), &mut terminal, Some(RECENT_ORDERS)).await?;

        assert_eq!(
            terminal.transcript(),
            "Your 5 most recent orders:\n- #12\n- #9"
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_history_is_reported() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_list_orders()
            .return_once(|_, _| Ok(Vec::new()));

        let ctx = mocks.into_context();
        let mut terminal = ScriptedTerminal::new(Vec::<String>::new());

        view_orders(&ctx, &session(), &mut terminal, None).await?;

        assert!(terminal.showed("You have no order history."));

        Ok(())
    }

    #[tokio::test]
    async fn order_info_shows_details_and_items() -> TestResult {
        let mut mocks = Mocks::new();
        let ordered_at: Timestamp = "2026-03-01T10:00:00Z".parse()?;

        mocks
            .orders
            .expect_get_order()
            .once()
            .withf(|login, order_id| login == "alice" && *order_id == OrderId::from_number(4))
            .return_once(move |login, order_id| {
                Ok(OrderDetails {
                    order: OrderRecord {
                        order_id,
                        login: login.to_string(),
                        game_count: 2,
                        total_price: dec!(19.98),
                        ordered_at,
                        due_at: due_date(ordered_at),
                    },
                    tracking_id: Some(TrackingId::from_number(6)),
                    items: vec![OrderItemRecord {
                        game_id: "G1".to_string(),
                        units: 2,
                    }],
                })
            });

        let ctx = mocks.into_context();
        let mut terminal = ScriptedTerminal::new(["4"]);

        view_order_info(&ctx, &session(), &mut terminal).await?;

        assert!(terminal.showed("- Total Price: $19.98"));
        assert!(terminal.showed("- Tracking ID: 6"));
        assert!(terminal.showed("- Due Date: 2026-03-08T10:00:00Z"));
        assert!(terminal.showed("Games in this order:"));

        Ok(())
    }

    #[tokio::test]
    async fn order_of_someone_else_is_not_shown() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_get_order()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let ctx = mocks.into_context();
        let mut terminal = ScriptedTerminal::new(["4"]);

        view_order_info(&ctx, &session(), &mut terminal).await?;

        assert!(terminal.showed("Order not found or does not belong to you."));

        Ok(())
    }
}
