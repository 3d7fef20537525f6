//! Users Data

use gamerental::roles::Role;

/// New User Data
///
/// Accounts always start as customers with no favorites and nothing overdue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login: String,
    pub password: String,
    pub phone_number: String,
}

/// A single-field change to a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserUpdate {
    Login(String),
    Password(String),
    Role(Role),
    FavoriteGames(String),
    PhoneNumber(String),
    OverdueGames(u32),
}
