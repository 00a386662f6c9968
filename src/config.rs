//! Configuration management for the Libris core

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Circulation policy: loan period, fine rate and dashboard limits.
#[derive(Debug, Deserialize, Clone)]
pub struct CirculationConfig {
    pub loan_period_days: i64,
    pub fine_per_day: f64,
    pub top_books: usize,
    pub notification_limit: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub circulation: CirculationConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix LIBRIS_)
            .add_source(
                Environment::with_prefix("LIBRIS")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override database URL from DATABASE_URL env var if present
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://library.db?mode=rwc".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for CirculationConfig {
    fn default() -> Self {
        Self {
            loan_period_days: 7,
            fine_per_day: 5.0,
            top_books: 3,
            notification_limit: 30,
        }
    }
}
