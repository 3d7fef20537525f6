//! Catalog flows

use gamerental::roles::Capability;
use rust_decimal::Decimal;

use crate::{
    context::AppContext,
    domain::catalog::{
        CatalogServiceError,
        data::{CatalogFilter, CatalogQuery, CatalogUpdate, PriceOrder},
    },
    menu::{errors::FlowError, render},
    session::Session,
    terminal::{Terminal, prompt_parsed},
};

pub(crate) async fn view_catalog(
    ctx: &AppContext,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    terminal.say("Choose filter option:");
    terminal.say("1. No Filter");
    terminal.say("2. Filter by Genre");
    terminal.say("3. Filter by Price");

    let filter = match prompt_parsed::<u32>(terminal, "Enter choice: ", "filter option").await? {
        2 => CatalogFilter::Genre(terminal.prompt_line("Enter genre: ").await?.trim().to_string()),
        3 => CatalogFilter::MaxPrice(
            prompt_parsed::<Decimal>(terminal, "Enter maximum price: ", "price").await?,
        ),
        _ => CatalogFilter::All,
    };

    terminal.say("Choose sorting option:");
    terminal.say("1. Price: Lowest to Highest");
    terminal.say("2. Price: Highest to Lowest");

    let order = match prompt_parsed::<u32>(terminal, "Enter choice: ", "sorting option").await? {
        2 => PriceOrder::Descending,
        _ => PriceOrder::Ascending,
    };

    let games = ctx.catalog.list_games(CatalogQuery { filter, order }).await?;

    if games.is_empty() {
        terminal.say("No games match your filter.");
    } else {
        terminal.say(&render::catalog(&games));
    }

    Ok(())
}

/// Change one field of a catalog entry. Managers only.
pub(crate) async fn update_catalog(
    ctx: &AppContext,
    session: &Session,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    session.require(Capability::UpdateCatalog)?;

    let game_id = terminal.prompt_line("Enter gameID to update: ").await?;
    let game_id = game_id.trim();

    match ctx.catalog.get_game(game_id).await {
        Ok(_) => {}
        Err(CatalogServiceError::NotFound) => {
            terminal.say("Game info not found.");

            return Ok(());
        }
        Err(error) => return Err(error.into()),
    }

    terminal.say("1. Update Game Name");
    terminal.say("2. Update Genre");
    terminal.say("3. Update Price");
    terminal.say("4. Update Description");
    terminal.say("5. Update Image URL");

    let choice: u32 = prompt_parsed(terminal, "Enter your choice: ", "menu choice").await?;

    let (update, confirmation) = match choice {
        1 => (
            CatalogUpdate::Name(terminal.prompt_line("Enter the updated game name: ").await?),
            "Game name successfully updated.",
        ),
        2 => (
            CatalogUpdate::Genre(terminal.prompt_line("Enter the updated game genre: ").await?),
            "Game genre successfully updated.",
        ),
        3 => (
            CatalogUpdate::Price(
                prompt_parsed(terminal, "Enter the updated game price: ", "price").await?,
            ),
            "Game price successfully updated.",
        ),
        4 => (
            CatalogUpdate::Description(
                terminal
                    .prompt_line("Enter the updated game description: ")
                    .await?,
            ),
            "Game description successfully updated.",
        ),
        5 => (
            CatalogUpdate::ImageUrl(
                terminal
                    .prompt_line("Enter the game's updated image URL: ")
                    .await?,
            ),
            "Game image URL successfully updated.",
        ),
        _ => {
            terminal.say("Invalid choice.");

            return Ok(());
        }
    };

    match ctx.catalog.update_game(game_id, update).await {
        Ok(_) => terminal.say(confirmation),
        Err(CatalogServiceError::InvalidData) => {
            terminal.warn("The catalog rejected that value; prices cannot be negative.");
        }
        Err(error) => return Err(error.into()),
    }

    Ok(())
}
