//! User administration flow

use gamerental::roles::{Capability, Role};

use crate::{
    context::AppContext,
    domain::users::{UsersServiceError, data::UserUpdate},
    menu::errors::FlowError,
    session::Session,
    terminal::{Terminal, prompt_parsed},
};

/// Change one field of any user. Managers only.
///
/// When managers edit their own account the session follows the change.
pub(crate) async fn update_user(
    ctx: &AppContext,
    session: &mut Session,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    session.require(Capability::UpdateUsers)?;

    let login = terminal.prompt_line("Enter user login to update: ").await?;
    let login = login.trim();

    match ctx.users.get_user(login).await {
        Ok(_) => {}
        Err(UsersServiceError::NotFound) => {
            terminal.say("User not found.");

            return Ok(());
        }
        Err(error) => return Err(error.into()),
    }

    terminal.say("1. Update User Password");
    terminal.say("2. Update User Role");
    terminal.say("3. Update User Favorite Games");
    terminal.say("4. Update User Phone Number");
    terminal.say("5. Update User Number of Overdue Games");

    let choice: u32 = prompt_parsed(terminal, "Enter your choice: ", "menu choice").await?;

    let (update, confirmation) = match choice {
        1 => (
            UserUpdate::Password(
                terminal
                    .prompt_line("Enter the updated user password: ")
                    .await?,
            ),
            "User's password successfully updated.",
        ),
        2 => {
            let role = terminal.prompt_line("Enter the updated user role: ").await?;

            let Ok(role) = role.parse::<Role>() else {
                terminal.warn("Invalid role type provided.");

                return Ok(());
            };

            (UserUpdate::Role(role), "User's role successfully updated.")
        }
        3 => (
            UserUpdate::FavoriteGames(
                terminal
                    .prompt_line("Enter the updated user's favorite games: ")
                    .await?,
            ),
            "User's favorite games successfully updated.",
        ),
        4 => (
            UserUpdate::PhoneNumber(
                terminal
                    .prompt_line("Enter the updated user's phone number: ")
                    .await?
                    .trim()
                    .to_string(),
            ),
            "User's phone number successfully updated.",
        ),
        5 => (
            UserUpdate::OverdueGames(
                prompt_parsed(
                    terminal,
                    "Enter the updated user's number of overdue games (>= 0): ",
                    "number of overdue games",
                )
                .await?,
            ),
            "User's overdue games successfully updated.",
        ),
        _ => {
            terminal.say("Invalid choice.");

            return Ok(());
        }
    };

    let updated = ctx.users.update_user(login, update).await?;

    if login == session.login() {
        session.refresh(&updated);
    }

    terminal.say(confirmation);

    Ok(())
}
