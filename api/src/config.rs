use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Upper bound on pooled database connections
    pub db_max_connections: u32,
    /// Connections older than this are recycled
    pub db_max_lifetime: Duration,
    /// Log every SQL statement
    pub db_sql_logging: bool,
    /// Create missing tables and indexes at startup
    pub auto_migrate: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            db_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 10)?,
            db_max_lifetime: Duration::from_secs(parse_var("DATABASE_MAX_LIFETIME_SECS", 3600)?),
            db_sql_logging: parse_var("DATABASE_SQL_LOGGING", false)?,
            auto_migrate: parse_var("AUTO_MIGRATE", true)?,
        })
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}
