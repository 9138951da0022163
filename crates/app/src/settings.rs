//! Application settings, read from `settings.toml` and `DIVVY__*` variables.
//!
//! ```toml
//! [app]
//! level = "debug"
//!
//! [server]
//! bind = "0.0.0.0"
//! port = 8080
//! database = "memory"            # or { sqlite = "divvy.db" }
//! ```
//!
//! Every key is optional. The file path can be changed with `DIVVY_CONFIG`;
//! environment variables use `__` between sections, e.g.
//! `DIVVY__SERVER__PORT=8080`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const CONFIG_PATH_VAR: &str = "DIVVY_CONFIG";

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Self::Sqlite("divvy.db".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
            database: Database::default(),
        }
    }
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "settings".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("DIVVY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
