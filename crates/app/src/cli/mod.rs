//! Command line configuration

use std::str::FromStr;

use clap::Parser;
use gamerental::orders::EmptyCartPolicy;
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("either --database-url or --dbname is required")]
    MissingDatabase,

    #[error("invalid database url")]
    InvalidUrl(#[source] sqlx::Error),
}

/// Game rental console configuration
#[derive(Debug, Parser)]
#[command(name = "gamerental", about = "Game rental console", long_about = None)]
pub struct Cli {
    /// `PostgreSQL` connection string; takes precedence over the individual options
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database name
    #[arg(long)]
    pub dbname: Option<String>,

    /// Database server host
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Database server port
    #[arg(long, default_value_t = 5432)]
    pub port: u16,

    /// Database user
    #[arg(long)]
    pub user: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Whether an order without any games may be placed (allow, reject)
    #[arg(
        long,
        env = "GAMERENTAL_EMPTY_CART_POLICY",
        default_value_t = EmptyCartPolicy::Allow
    )]
    pub empty_cart_policy: EmptyCartPolicy,
}

/// Values the menu flows and services need at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppSettings {
    pub empty_cart_policy: EmptyCartPolicy,
}

impl Cli {
    /// Load configuration from `.env`, the environment and arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Connection options for the session database.
    ///
    /// # Errors
    ///
    /// Returns an error when no database is named or the URL is malformed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.database_url {
            return PgConnectOptions::from_str(url).map_err(ConfigError::InvalidUrl);
        }

        let dbname = self.dbname.as_deref().ok_or(ConfigError::MissingDatabase)?;

        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(dbname);

        Ok(match &self.user {
            Some(user) => options.username(user),
            None => options,
        })
    }

    #[must_use]
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            empty_cart_policy: self.empty_cart_policy,
        }
    }
}
