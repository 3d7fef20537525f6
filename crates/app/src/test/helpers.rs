//! Test Helpers

use std::sync::Arc;

use gamerental::{ids::TrackingId, roles::Role};
use rust_decimal::Decimal;

use crate::{
    context::AppContext,
    domain::{
        catalog::{MockCatalogService, records::CatalogEntry},
        orders::MockOrdersService,
        tracking::MockTrackingService,
        users::{
            MockUsersService, UsersService, UsersServiceError, data::NewUser, records::UserRecord,
        },
    },
    test::TestContext,
};

pub(crate) async fn create_user(
    ctx: &TestContext,
    login: &str,
    password: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            login: login.to_string(),
            password: password.to_string(),
            phone_number: "555-0100".to_string(),
        })
        .await
}

/// Games are only ever managed outside the console, so they are inserted directly.
pub(crate) async fn create_game(
    ctx: &TestContext,
    game_id: &str,
    name: &str,
    genre: &str,
    price: Decimal,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO catalog (gameid, gamename, genre, price, description, imageurl) \
         VALUES ($1, $2, $3, $4, $5, '')",
    )
    .bind(game_id)
    .bind(name)
    .bind(genre)
    .bind(price)
    .bind(format!("{name} ({genre})"))
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

/// Write a bare order header, as an older client might have.
pub(crate) async fn insert_order_row(
    ctx: &TestContext,
    order_id: &str,
    login: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO rentalorder (rentalorderid, login, noofgames, totalprice, ordertimestamp, duedate) \
         VALUES ($1, $2, 0, 0, now(), now() + interval '7 days')",
    )
    .bind(order_id)
    .bind(login)
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

/// Write a tracking row with an arbitrary identifier, as an older client might have.
pub(crate) async fn insert_tracking_row(
    ctx: &TestContext,
    tracking_id: &str,
    order_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO trackinginfo (trackingid, rentalorderid, status, currentlocation, couriername, lastupdatedate, additionalcomments) \
         VALUES ($1, $2, 'Order Processing', 'home office', 'TBD', now(), '')",
    )
    .bind(tracking_id)
    .bind(order_id)
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

/// Count the rows of one of the fixture tables.
pub(crate) async fn count_rows(ctx: &TestContext, table: &str) -> Result<i64, sqlx::Error> {
    let sql = match table {
        "users" => "SELECT COUNT(*) FROM users",
        "catalog" => "SELECT COUNT(*) FROM catalog",
        "rentalorder" => "SELECT COUNT(*) FROM rentalorder",
        "trackinginfo" => "SELECT COUNT(*) FROM trackinginfo",
        "gamesinorder" => "SELECT COUNT(*) FROM gamesinorder",
        other => return Err(sqlx::Error::Protocol(format!("unknown table {other}"))),
    };

    sqlx::query_scalar(sql).fetch_one(ctx.db.pool()).await
}

pub(crate) async fn tracking_status(
    ctx: &TestContext,
    tracking_id: TrackingId,
) -> Result<String, sqlx::Error> {
    sqlx::query_scalar("SELECT status FROM trackinginfo WHERE trackingid = $1")
        .bind(tracking_id.to_string())
        .fetch_one(ctx.db.pool())
        .await
}

pub(crate) fn game(game_id: &str, name: &str, price: Decimal) -> CatalogEntry {
    CatalogEntry {
        game_id: game_id.to_string(),
        name: name.to_string(),
        genre: "Strategy".to_string(),
        price,
        description: String::new(),
        image_url: String::new(),
    }
}

/// A user whose password is `secret`.
pub(crate) fn user(login: &str, role: Role) -> UserRecord {
    UserRecord {
        login: login.to_string(),
        password: "secret".to_string(),
        role,
        favorite_games: String::new(),
        phone_number: "555-0100".to_string(),
        overdue_games: 0,
    }
}

/// Mock services for menu flow tests.
///
/// A mock without expectations panics when called, so flows that must not
/// touch a service need no further setup.
pub(crate) struct Mocks {
    pub(crate) users: MockUsersService,
    pub(crate) catalog: MockCatalogService,
    pub(crate) orders: MockOrdersService,
    pub(crate) tracking: MockTrackingService,
}

impl Mocks {
    pub(crate) fn new() -> Self {
        Self {
            users: MockUsersService::new(),
            catalog: MockCatalogService::new(),
            orders: MockOrdersService::new(),
            tracking: MockTrackingService::new(),
        }
    }

    pub(crate) fn into_context(self) -> AppContext {
        AppContext {
            users: Arc::new(self.users),
            catalog: Arc::new(self.catalog),
            orders: Arc::new(self.orders),
            tracking: Arc::new(self.tracking),
        }
    }
}
