//! Menu
//!
//! The interactive loop: a logged-out menu for creating accounts and logging
//! in, and a session menu whose staff options depend on the operator's role.
//! Every flow error is reported here and the loop carries on; only closed or
//! unreadable input ends it.

use gamerental::roles::Capability;
use tracing::{debug, warn};

use crate::{
    context::AppContext,
    menu::errors::{FlowError, describe},
    session::Session,
    terminal::{InputError, Terminal, prompt_parsed},
};

mod account;
mod cart;
mod catalog;
pub mod errors;
mod orders;
mod render;
mod tracking;
mod users;

/// Run the menu until the operator exits or input ends.
///
/// # Errors
///
/// Returns an [`InputError`] when reading input fails.
pub async fn run(ctx: &AppContext, terminal: &mut dyn Terminal) -> Result<(), InputError> {
    match main_menu(ctx, terminal).await {
        Err(InputError::Closed) => {
            debug!("input closed");

            Ok(())
        }
        result => result,
    }
}

async fn main_menu(ctx: &AppContext, terminal: &mut dyn Terminal) -> Result<(), InputError> {
    loop {
        terminal.say("MAIN MENU");
        terminal.say("---------");
        terminal.say("1. Create user");
        terminal.say("2. Log in");
        terminal.say("9. < EXIT");

        let Some(choice) = read_choice(terminal).await? else {
            continue;
        };

        match choice {
            1 => {
                let result = account::create_user(ctx, terminal).await;

                report(terminal, result)?;
            }
            2 => {
                let result = account::log_in(ctx, terminal).await;

                if let Some(Some(session)) = report(terminal, result)? {
                    session_menu(ctx, session, terminal).await?;
                }
            }
            9 => return Ok(()),
            _ => terminal.say("Unrecognized choice!"),
        }
    }
}

async fn session_menu(
    ctx: &AppContext,
    mut session: Session,
    terminal: &mut dyn Terminal,
) -> Result<(), InputError> {
    debug!(login = session.login(), role = %session.role(), "session started");

    loop {
        terminal.say("MAIN MENU");
        terminal.say("---------");
        terminal.say("1. View Profile");
        terminal.say("2. Update Profile");
        terminal.say("3. View Catalog");
        terminal.say("4. Place Rental Order");
        terminal.say("5. View Full Rental Order History");
        terminal.say("6. View Past 5 Rental Orders");
        terminal.say("7. View Rental Order Information");
        terminal.say("8. View Tracking Information");

        if session.can(Capability::UpdateTracking) {
            terminal.say("9. Update Tracking Information");
        }

        if session.can(Capability::UpdateCatalog) {
            terminal.say("10. Update Catalog");
        }

        if session.can(Capability::UpdateUsers) {
            terminal.say("11. Update User");
        }

        terminal.say(".........................");
        terminal.say("20. Log out");

        let Some(choice) = read_choice(terminal).await? else {
            continue;
        };

        let result = match choice {
            1 => account::view_profile(ctx, &session, terminal).await,
            2 => account::update_profile(ctx, &mut session, terminal).await,
            3 => catalog::view_catalog(ctx, terminal).await,
            4 => orders::place_order(ctx, &session, terminal).await,
            5 => orders::view_orders(ctx, &session, terminal, None).await,
            6 => orders::view_orders(ctx, &session, terminal, Some(orders::RECENT_ORDERS)).await,
            7 => orders::view_order_info(ctx, &session, terminal).await,
            8 => tracking::view_tracking(ctx, &session, terminal).await,
            9 => tracking::update_tracking(ctx, &session, terminal).await,
            10 => catalog::update_catalog(ctx, &session, terminal).await,
            11 => users::update_user(ctx, &mut session, terminal).await,
            20 => {
                debug!(login = session.login(), "session ended");

                return Ok(());
            }
            _ => {
                terminal.say("Unrecognized choice!");

                continue;
            }
        };

        report(terminal, result)?;
    }
}

/// Read a menu choice, reporting malformed input as `None`.
async fn read_choice(terminal: &mut dyn Terminal) -> Result<Option<u32>, InputError> {
    match prompt_parsed(terminal, "Please make your choice: ", "menu choice").await {
        Ok(choice) => Ok(Some(choice)),
        Err(InputError::Invalid { .. }) => {
            terminal.warn("Your input is invalid!");

            Ok(None)
        }
        Err(InputError::Io(error)) => {
            read_failed(terminal, &error);

            Ok(None)
        }
        Err(InputError::Closed) => Err(InputError::Closed),
    }
}

/// A line that could not be read is lost, but the terminal stays usable.
fn read_failed(terminal: &mut dyn Terminal, error: &std::io::Error) {
    warn!(%error, "failed to read input");
    terminal.warn(&format!("Error reading input: {error}"));
}

/// Report a flow failure to the operator.
///
/// Returns `None` for failures the session survives. Only closed input is
/// returned as an error.
fn report<T>(
    terminal: &mut dyn Terminal,
    result: Result<T, FlowError>,
) -> Result<Option<T>, InputError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(FlowError::Input(InputError::Invalid { value, expected })) => {
            terminal.warn(&format!("Your input is invalid! {value:?} is not a valid {expected}."));

            Ok(None)
        }
        Err(FlowError::Input(InputError::Io(error))) => {
            read_failed(terminal, &error);

            Ok(None)
        }
        Err(FlowError::Input(InputError::Closed)) => Err(InputError::Closed),
        Err(FlowError::AccessDenied(denied)) => {
            terminal.warn(&format!("You are not authorized: {denied}."));

            Ok(None)
        }
        Err(error) => {
            let message = describe(&error);

            warn!(error = %message, "operation failed");
            terminal.warn(&format!("Error: {message}"));

            Ok(None)
        }
    }
}
