//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ledger configuration.
    pub ledger: LedgerConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Functional currency of the books.
    pub currency: Currency,
    /// JSON file with journal transactions to load at startup.
    pub journal_path: Option<PathBuf>,
    /// Load the built-in demo journal when no file is configured.
    pub seed_demo: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency: Currency::Uzs,
            journal_path: None,
            seed_demo: true,
        }
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::Pretty,
        }
    }
}

fn default_filter() -> String {
    "hisob=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default.toml`, `config/{RUN_MODE}.toml`, `HISOB__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("HISOB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ledger.currency, Currency::Uzs);
        assert!(config.ledger.seed_demo);
        assert!(config.ledger.journal_path.is_none());
        assert_eq!(config.log.filter, "hisob=info");
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "HISOB__LEDGER__CURRENCY",
                "HISOB__LEDGER__SEED_DEMO",
                "HISOB__LEDGER__JOURNAL_PATH",
                "HISOB__LOG__FORMAT",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.ledger.currency, Currency::Uzs);
                assert!(config.ledger.seed_demo);
            },
        );
    }

    #[test]
    fn test_load_environment_overrides() {
        temp_env::with_vars(
            [
                ("HISOB__LEDGER__CURRENCY", Some("USD")),
                ("HISOB__LEDGER__SEED_DEMO", Some("false")),
                ("HISOB__LEDGER__JOURNAL_PATH", Some("/tmp/journal.json")),
                ("HISOB__LOG__FORMAT", Some("json")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.ledger.currency, Currency::Usd);
                assert!(!config.ledger.seed_demo);
                assert_eq!(
                    config.ledger.journal_path,
                    Some(PathBuf::from("/tmp/journal.json"))
                );
                assert_eq!(config.log.format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn test_load_rejects_unknown_currency() {
        temp_env::with_var("HISOB__LEDGER__CURRENCY", Some("XXX"), || {
            assert!(AppConfig::load().is_err());
        });
    }
}
