use serde::Deserialize;
use std::{error::Error, path::Path};
use tracing::info;

use crate::yaml_include::render_yaml_with_includes;

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CommonConfig {
    pub project_name: String,
    pub database_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct CliConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub common: CommonConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub cli: CliConfig,
}

impl Config {
    /// Load a config file, expanding `!include` directives.
    pub fn load(config_path: &Path) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let contents = render_yaml_with_includes(config_path)?;
        let config = serde_yml::from_str(&contents)?;

        Ok(config)
    }

    /// Load a config file and apply `DATABASE_URL` from the environment or a `.env` file.
    pub fn load_with_env(config_path: &Path) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let _ = dotenvy::dotenv();
        let mut config = Self::load(config_path)?;
        config.apply_database_url_override(std::env::var(DATABASE_URL_ENV).ok());
        Ok(config)
    }

    pub fn apply_database_url_override(&mut self, database_url: Option<String>) {
        if let Some(url) = database_url.filter(|url| !url.trim().is_empty()) {
            info!("Database URL overridden from {}", DATABASE_URL_ENV);
            self.common.database_url = url;
        }
    }
}
