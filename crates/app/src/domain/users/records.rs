//! User Records

use gamerental::roles::Role;

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub login: String,
    pub password: String,
    pub role: Role,
    pub favorite_games: String,
    pub phone_number: String,
    pub overdue_games: u32,
}
