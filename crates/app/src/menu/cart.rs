//! Cart Builder
//!
//! Collects game ids and quantities from the operator, pricing each entry from
//! the catalog as it is added. Nothing is written while the cart is built.

use gamerental::cart::{Cart, CartEntry, CartError};
use tracing::debug;

use crate::{
    domain::catalog::{CatalogService, CatalogServiceError},
    menu::errors::FlowError,
    terminal::{Terminal, prompt_parsed},
};

/// Prompt for games until the operator declines to add another.
///
/// # Errors
///
/// Returns a [`FlowError`] when input fails, a quantity is malformed, the
/// catalog cannot be read or the cart totals overflow.
pub(crate) async fn build_cart(
    catalog: &dyn CatalogService,
    terminal: &mut dyn Terminal,
) -> Result<Cart, FlowError> {
    let mut cart = Cart::new();

    loop {
        let game_id = terminal
            .prompt_line("Enter the game ID you would like to rent: ")
            .await?;

        match catalog.get_game(game_id.trim()).await {
            Ok(game) => {
                let message = format!(
                    "Enter how many copies of {} you would like to order: ",
                    game.name
                );

                let quantity: i64 = prompt_parsed(terminal, &message, "quantity").await?;

                match cart.add(&game.game_id, quantity, game.price) {
                    Ok(entry) => {
                        debug!(game_id = %game.game_id, quantity, ?entry, "cart entry");

                        if entry == CartEntry::Skipped {
                            terminal.say("No copies requested, nothing added.");
                        }
                    }
                    Err(CartError::PriceChanged { previous, current, .. }) => {
                        terminal.warn(&format!(
                            "The price of {} changed from ${previous:.2} to ${current:.2}, nothing added.",
                            game.name
                        ));
                    }
                    Err(error) => return Err(error.into()),
                }
            }
            Err(CatalogServiceError::NotFound) => {
                terminal.warn("Game not found or no price available.");
            }
            Err(error) => return Err(error.into()),
        }

        let answer = terminal
            .prompt_line("Would you like to add another game to your cart? (y/n): ")
            .await?;

        if !answer.trim().eq_ignore_ascii_case("y") {
            return Ok(cart);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        domain::catalog::MockCatalogService,
        terminal::InputError,
        test::{helpers::game, terminal::ScriptedTerminal},
    };

    use super::*;

    #[tokio::test]
    async fn two_copies_of_one_game() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_game()
            .once()
            .withf(|game_id| game_id == "G1")
            .returning(|_| Ok(game("G1", "Chess", dec!(9.99))));

        catalog.expect_list_games().never();
        catalog.expect_update_game().never();

        let mut terminal = ScriptedTerminal::new(["G1", "2", "n"]);

        let cart = build_cart(&catalog, &mut terminal).await?;

        assert_eq!(cart.game_count(), 2);
        assert_eq!(cart.total_price(), dec!(19.98));
        assert_eq!(cart.items().len(), 1);
        assert!(terminal.showed("Enter how many copies of Chess"));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_game_leaves_totals_unchanged() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_game()
            .withf(|game_id| game_id == "nope")
            .returning(|_| Err(CatalogServiceError::NotFound));

        catalog
            .expect_get_game()
            .withf(|game_id| game_id == "G2")
            .returning(|_| Ok(game("G2", "Go", dec!(5.00))));

        let mut terminal = ScriptedTerminal::new(["nope", "y", "G2", "1", "n"]);

        let cart = build_cart(&catalog, &mut terminal).await?;

        assert!(terminal.showed("Game not found or no price available."));
        assert_eq!(cart.game_count(), 1);
        assert_eq!(cart.total_price(), dec!(5.00));

        Ok(())
    }

    #[tokio::test]
    async fn zero_copies_add_nothing() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_game()
            .returning(|game_id| Ok(game(game_id, "Chess", dec!(9.99))));

        let mut terminal = ScriptedTerminal::new(["G1", "0", "n"]);

        let cart = build_cart(&catalog, &mut terminal).await?;

        assert!(cart.is_empty());
        assert_eq!(cart.game_count(), 0);
        assert_eq!(cart.total_price(), dec!(0));

        Ok(())
    }

    #[tokio::test]
    async fn uppercase_y_continues() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_game()
            .times(2)
            .returning(|game_id| Ok(game(game_id, "Chess", dec!(1.50))));

        let mut terminal = ScriptedTerminal::new(["G1", "1", "Y", "G2", "3", "no"]);

        let cart = build_cart(&catalog, &mut terminal).await?;

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.game_count(), 4);
        assert_eq!(cart.total_price(), dec!(6.00));
        assert_eq!(terminal.remaining(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn repriced_game_is_not_merged() -> TestResult {
        let mut catalog = MockCatalogService::new();
        let lookups = AtomicUsize::new(0);

        catalog.expect_get_game().times(2).returning(move |game_id| {
            let price = if lookups.fetch_add(1, Ordering::Relaxed) == 0 {
                dec!(9.99)
            } else {
                dec!(12.99)
            };

            Ok(game(game_id, "Chess", price))
        });

        let mut terminal = ScriptedTerminal::new(["G1", "1", "y", "G1", "2", "n"]);

        let cart = build_cart(&catalog, &mut terminal).await?;

        assert!(
            terminal.showed("The price of Chess changed from $9.99 to $12.99, nothing added."),
            "unexpected output:\n{}",
            terminal.transcript()
        );
        assert_eq!(cart.game_count(), 1);
        assert_eq!(cart.total_price(), dec!(9.99));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_quantity_aborts() {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_game()
            .returning(|game_id| Ok(game(game_id, "Chess", dec!(9.99))));

        let mut terminal = ScriptedTerminal::new(["G1", "two", "n"]);

        let result = build_cart(&catalog, &mut terminal).await;

        assert!(
            matches!(
                result,
                Err(FlowError::Input(InputError::Invalid { ref value, .. })) if value == "two"
            ),
            "expected invalid quantity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn catalog_failure_aborts() {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_game()
            .returning(|_| Err(CatalogServiceError::InvalidData));

        let mut terminal = ScriptedTerminal::new(["G1", "n"]);

        let result = build_cart(&catalog, &mut terminal).await;

        assert!(
            matches!(result, Err(FlowError::Catalog(CatalogServiceError::InvalidData))),
            "expected catalog error, got {result:?}"
        );
    }
}
