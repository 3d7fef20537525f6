//! Game rental console: persistence services and operator menu flows.

pub mod cli;
pub mod context;
pub mod database;
pub mod domain;
pub mod menu;
pub mod session;
pub mod terminal;

#[cfg(test)]
mod test;
