//! Tracking flows

use gamerental::{ids::TrackingId, roles::Capability};
use jiff::Timestamp;

use crate::{
    context::AppContext,
    domain::tracking::{TrackingServiceError, data::TrackingUpdate},
    menu::errors::FlowError,
    session::Session,
    terminal::{Terminal, prompt_parsed},
};

pub(crate) async fn view_tracking(
    ctx: &AppContext,
    session: &Session,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    let number: u64 = prompt_parsed(
        terminal,
        "Enter the tracking ID # of the order you'd like to view: ",
        "tracking number",
    )
    .await?;

    let tracking = match ctx
        .tracking
        .get_tracking(session.login(), TrackingId::from_number(number))
        .await
    {
        Ok(tracking) => tracking,
        Err(TrackingServiceError::NotFound) => {
            terminal.say("Tracking info not found or does not belong to you.");

            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    terminal.say("Tracking Info details:");
    terminal.say(&format!("- Tracking ID: #{}", tracking.tracking_id.number()));
    terminal.say(&format!("- Rental Order ID: #{}", tracking.order_id.number()));
    terminal.say(&format!("- Status: {}", tracking.status));
    terminal.say(&format!("- Current Location: {}", tracking.location));
    terminal.say(&format!("- Courier: {}", tracking.courier));
    terminal.say(&format!("- Last Updated Date: {}", tracking.last_updated));
    terminal.say(&format!("- Additional Comments: {}", tracking.comments));

    Ok(())
}

/// Change one field of any tracking record. Employees and managers only.
pub(crate) async fn update_tracking(
    ctx: &AppContext,
    session: &Session,
    terminal: &mut dyn Terminal,
) -> Result<(), FlowError> {
    session.require(Capability::UpdateTracking)?;

    let number: u64 = prompt_parsed(terminal, "Enter trackingID to update: ", "tracking number").await?;
    let tracking_id = TrackingId::from_number(number);

    if !ctx.tracking.tracking_exists(tracking_id).await? {
        terminal.say("Tracking info not found.");

        return Ok(());
    }

    terminal.say("1. Update Status");
    terminal.say("2. Update Location");
    terminal.say("3. Update Courier");
    terminal.say("4. Update Additional Comments");

    let choice: u32 = prompt_parsed(terminal, "Enter your choice: ", "menu choice").await?;

    let update = match choice {
        1 => TrackingUpdate::Status(terminal.prompt_line("Enter the updated status: ").await?),
        2 => TrackingUpdate::Location(terminal.prompt_line("Enter the updated location: ").await?),
        3 => TrackingUpdate::Courier(terminal.prompt_line("Enter the updated courier: ").await?),
        4 => TrackingUpdate::Comments(
            terminal
                .prompt_line("Enter the updated additional comments: ")
                .await?,
        ),
        _ => {
            terminal.say("Invalid choice.");

            return Ok(());
        }
    };

    match ctx
        .tracking
        .update_tracking(tracking_id, update, Timestamp::now())
        .await
    {
        Ok(updated) => terminal.say(&format!(
            "Tracking ID #{} successfully updated.",
            updated.tracking_id.number()
        )),
        Err(TrackingServiceError::NotFound) => terminal.say("Tracking info not found."),
        Err(error) => return Err(error.into()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use gamerental::{ids::OrderId, roles::Role};
    use testresult::TestResult;

    use crate::{
        domain::tracking::records::TrackingRecord,
        test::{helpers::Mocks, terminal::ScriptedTerminal},
    };

    use super::*;

    fn record(tracking_id: TrackingId, status: &str) -> TrackingRecord {
        TrackingRecord {
            tracking_id,
            order_id: OrderId::from_number(tracking_id.number()),
            status: status.to_string(),
            location: "home office".to_string(),
            courier: "TBD".to_string(),
            last_updated: Timestamp::UNIX_EPOCH,
            comments: String::new(),
        }
    }

    #[tokio::test]
    async fn own_tracking_is_shown() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .tracking
            .expect_get_tracking()
            .once()
            .withf(|login, tracking_id| {
                login == "alice" && *tracking_id == TrackingId::from_number(2)
            })
            .return_once(|_, tracking_id| Ok(record(tracking_id, "Order Processing")));

        let ctx = mocks.into_context();
        let session = Session::new("alice", Role::Customer);
        let mut terminal = ScriptedTerminal::new(["2"]);

        view_tracking(&ctx, &session, &mut terminal).await?;

        assert!(terminal.showed("- Tracking ID: #2"));
        assert!(terminal.showed("- Status: Order Processing"));
        assert!(terminal.showed("- Courier: TBD"));

        Ok(())
    }

    #[tokio::test]
    async fn foreign_tracking_is_not_shown() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .tracking
            .expect_get_tracking()
            .return_once(|_, _| Err(TrackingServiceError::NotFound));

        let ctx = mocks.into_context();
        let session = Session::new("alice", Role::Customer);
        let mut terminal = ScriptedTerminal::new(["2"]);

        view_tracking(&ctx, &session, &mut terminal).await?;

        assert!(terminal.showed("Tracking info not found or does not belong to you."));

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_update_tracking() {
        let mut mocks = Mocks::new();

        mocks.tracking.expect_tracking_exists().never();
        mocks.tracking.expect_update_tracking().never();

        let ctx = mocks.into_context();
        let session = Session::new("alice", Role::Customer);
        let mut terminal = ScriptedTerminal::new(["2", "1", "Shipped"]);

        let result = update_tracking(&ctx, &session, &mut terminal).await;

        assert!(
            matches!(result, Err(FlowError::AccessDenied(_))),
            "expected AccessDenied, got {result:?}"
        );
        assert_eq!(terminal.remaining(), 3);
    }

    #[tokio::test]
    async fn employee_updates_status() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .tracking
            .expect_tracking_exists()
            .once()
            .withf(|tracking_id| *tracking_id == TrackingId::from_number(2))
            .return_once(|_| Ok(true));

        mocks
            .tracking
            .expect_update_tracking()
            .once()
            .withf(|tracking_id, update, _| {
                *tracking_id == TrackingId::from_number(2)
                    && *update == TrackingUpdate::Status("Shipped".to_string())
            })
            .return_once(|tracking_id, _, _| Ok(record(tracking_id, "Shipped")));

        let ctx = mocks.into_context();
        let session = Session::new("clerk", Role::Employee);
        let mut terminal = ScriptedTerminal::new(["2", "1", "Shipped"]);

        update_tracking(&ctx, &session, &mut terminal).await?;

        assert!(terminal.showed("Tracking ID #2 successfully updated."));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_tracking_is_reported_before_field_prompts() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .tracking
            .expect_tracking_exists()
            .once()
            .return_once(|_| Ok(false));

        mocks.tracking.expect_update_tracking().never();

        let ctx = mocks.into_context();
        let session = Session::new("boss", Role::Manager);
        let mut terminal = ScriptedTerminal::new(["99", "3", "Speedy Parcels"]);

        update_tracking(&ctx, &session, &mut terminal).await?;

        assert!(terminal.showed("Tracking info not found."));
        assert!(!terminal.showed("1. Update Status"));
        assert_eq!(terminal.remaining(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn tracking_removed_during_update_is_reported() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .tracking
            .expect_tracking_exists()
            .return_once(|_| Ok(true));

        mocks
            .tracking
            .expect_update_tracking()
            .return_once(|_, _, _| Err(TrackingServiceError::NotFound));

        let ctx = mocks.into_context();
        let session = Session::new("boss", Role::Manager);
        let mut terminal = ScriptedTerminal::new(["99", "3", "Speedy Parcels"]);

        update_tracking(&ctx, &session, &mut terminal).await?;

        assert!(terminal.showed("Tracking info not found."));

        Ok(())
    }
}
