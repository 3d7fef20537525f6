//! Account flows

use gamerental::roles::{Capability, Role};
use tracing::info;

use crate::{
    context::AppContext,
    domain::users::{
        UsersServiceError,
        data::{NewUser, UserUpdate},
        records::UserRecord,
    },
    menu::{errors::FlowError, render},
    session::Session,
    terminal::{Terminal, prompt_parsed},
};

pub(crate) async fn create_user(
    ctx: &AppContext,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    let login = terminal.prompt_line("Enter username: ").await?;
    let password = terminal.prompt_line("Enter password: ").await?;
    let phone_number = terminal.prompt_line("Enter phone number: ").await?;

    let created = ctx
        .users
        .create_user(NewUser {
            login: login.trim().to_string(),
            password,
            phone_number: phone_number.trim().to_string(),
        })
        .await;

    match created {
        Ok(user) => {
            info!(login = %user.login, "created user");
            terminal.say("User created successfully! Returning to menu...");
        }
        Err(UsersServiceError::AlreadyExists) => {
            terminal.warn("Username unavailable. Please try again.");
        }
        Err(error) => return Err(error.into()),
    }

    Ok(())
}

/// Ask for credentials, returning a session when they match an account.
pub(crate) async fn log_in(
    ctx: &AppContext,
    terminal: &mut dyn Terminal,
) -> Result<Option<Session>, FlowError> {
    let login = terminal.prompt_line("Enter username: ").await?;
    let password = terminal.prompt_line("Enter password: ").await?;

    match ctx.users.log_in(login.trim(), &password).await {
        Ok(user) => {
            terminal.say(&format!("Welcome, {}!", user.login));

            Ok(Some(Session::from(&user)))
        }
        Err(UsersServiceError::InvalidCredentials) => {
            terminal.say("Invalid username or password.");

            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

pub(crate) async fn view_profile(
    ctx: &AppContext,
    session: &Session,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    let user = ctx.users.get_user(session.login()).await?;

    terminal.say("Profile Information:");
    terminal.say(&render::profile(&user));

    Ok(())
}

/// Change one field of the operator's own account.
///
/// Password and phone number changes require the current password. The
/// session follows login and role changes.
pub(crate) async fn update_profile(
    ctx: &AppContext,
    session: &mut Session,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    let user = ctx.users.get_user(session.login()).await?;
    let manages_account = session.can(Capability::ManageOwnAccount);

    terminal.say("1. Change Password");
    terminal.say("2. Update Phone Number");

    if manages_account {
        terminal.say("3. Change Login (Manager only)");
        terminal.say("4. Update Role (Manager only)");
        terminal.say("5. Update Number of Overdue Games (Manager only)");
    }

    let choice: u32 = prompt_parsed(terminal, "Enter your choice: ", "menu choice").await?;

    let (update, confirmation) = match (choice, manages_account) {
        (1, _) => {
            if !confirm_password(&user, terminal).await? {
                return Ok(());
            }

            let password = terminal.prompt_line("Enter your new password: ").await?;

            (UserUpdate::Password(password), "Password updated successfully.")
        }
        (2, _) => {
            if !confirm_password(&user, terminal).await? {
                return Ok(());
            }

            let phone_number = terminal.prompt_line("Enter your new phone number: ").await?;

            (
                UserUpdate::PhoneNumber(phone_number.trim().to_string()),
                "Phone number updated successfully.",
            )
        }
        (3, true) => {
            let login = terminal.prompt_line("Enter your new login: ").await?;

            (
                UserUpdate::Login(login.trim().to_string()),
                "Username updated successfully.",
            )
        }
        (4, true) => {
            terminal.warn(
                "WARNING: Changing your role to non-manager is irreversible without another manager's authority!",
            );

            let role = terminal
                .prompt_line("Enter your new role (manager, employee, customer): ")
                .await?;

            let Ok(role) = role.parse::<Role>() else {
                terminal.warn("Invalid role type provided.");

                return Ok(());
            };

            (UserUpdate::Role(role), "Role updated successfully.")
        }
        (5, true) => {
            let overdue: u32 = prompt_parsed(
                terminal,
                "Enter new # of overdue games (>= 0): ",
                "number of overdue games",
            )
            .await?;

            (
                UserUpdate::OverdueGames(overdue),
                "Overdue games updated successfully.",
            )
        }
        _ => {
            terminal.say("Invalid choice.");

            return Ok(());
        }
    };

    let updated = ctx.users.update_user(session.login(), update).await?;

    session.refresh(&updated);
    terminal.say(confirmation);

    Ok(())
}

async fn confirm_password(
    user: &UserRecord,
    terminal: &mut dyn Terminal,
) -> Result<bool, FlowError> {
    let entered = terminal.prompt_line("Enter your old password: ").await?;

    if entered == user.password {
        return Ok(true);
    }

    terminal.warn("Incorrect password... returning to menu.");

    Ok(false)
}
