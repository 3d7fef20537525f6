//! Table rendering

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::domain::{
    catalog::records::CatalogEntry, orders::records::OrderItemRecord, users::records::UserRecord,
};

pub(crate) fn catalog(games: &[CatalogEntry]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Game ID", "Name", "Genre", "Price", "Details"]);

    for game in games {
        builder.push_record([
            game.game_id.clone(),
            game.name.clone(),
            game.genre.clone(),
            format!("${:.2}", game.price),
            game.description.clone(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());

    table.to_string()
}

/// Every profile field except the role.
pub(crate) fn profile(user: &UserRecord) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Login", user.login.as_str()]);
    builder.push_record(["Password", user.password.as_str()]);
    builder.push_record(["Favorite Games", user.favorite_games.as_str()]);
    builder.push_record(["Phone Number", user.phone_number.as_str()]);
    builder.push_record(["Overdue Games", &user.overdue_games.to_string()]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    table.to_string()
}

pub(crate) fn order_items(items: &[OrderItemRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Game ID", "Units Ordered"]);

    for item in items {
        builder.push_record([item.game_id.clone(), item.units.to_string()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..2), Alignment::right());

    table.to_string()
}
