use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Optional config file, looked up in the working directory
pub const CONFIG_FILE: &str = "customer-api";

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server: Server,
    pub database: Database,
    pub logger: Logger,
}

impl AppConfig {
    /// Defaults, then `customer-api.toml`, then `CUSTOMER_API__*` variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix("CUSTOMER_API").separator("__"))
            .build()?
            .try_deserialize::<AppConfig>()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.bind", "0.0.0.0:3000")?
            .set_default("database.path", "customers.db")?
            .set_default("logger.level", "INFO")
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub bind: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Database {
    /// SQLite file, or `:memory:` for the in-memory store
    pub path: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}

/// Install the fmt subscriber at the configured level
pub fn init_logging(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(&config.logger.level))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.database.path, "customers.db");
        assert_eq!(config.logger.level, Level::INFO);
    }

    #[test]
    fn test_override_wins_over_default() {
        let config = AppConfig::builder()
            .unwrap()
            .set_override("database.path", ":memory:")
            .unwrap()
            .set_override("logger.level", "DEBUG")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap();

        assert_eq!(config.database.path, ":memory:");
        assert_eq!(tracing::Level::from(&config.logger.level), tracing::Level::DEBUG);
    }
}
