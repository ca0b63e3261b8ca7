//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use quill_core::pagination::DEFAULT_PAGE_SIZE;
use quill_core::reading::DEFAULT_WORDS_PER_MINUTE;
use quill_core::services::ServiceSettings;

use crate::telemetry::TelemetryConfig;

/// Database pool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Log every statement sqlx executes.
    pub sqlx_logging: bool,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` runs the services against in-memory storage.
    pub database: Option<DatabaseConfig>,
    pub telemetry: TelemetryConfig,
    pub services: ServiceSettings,
}

impl AppConfig {
    /// Load configuration from the process environment, reading `.env`
    /// first when one exists.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(100),
                min_connections: parsed(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(10),
                sqlx_logging: flag(&lookup, "DB_SQLX_LOGGING").unwrap_or(false),
            });

        let telemetry = TelemetryConfig {
            json_logs: lookup("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "quill".to_string()),
        };

        // Zero would make every estimate divide by nothing or every page empty.
        let services = ServiceSettings {
            words_per_minute: parsed(&lookup, "READING_WPM")
                .filter(|wpm| *wpm > 0)
                .unwrap_or(DEFAULT_WORDS_PER_MINUTE),
            default_page_size: parsed(&lookup, "DEFAULT_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        };

        Self {
            database,
            telemetry,
            services,
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable configuration value");
            None
        }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    lookup(key).map(|v| v != "false" && v != "0")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert!(config.database.is_none());
        assert!(!config.telemetry.json_logs);
        assert_eq!(config.telemetry.service_name, "quill");
        assert_eq!(config.services, ServiceSettings::default());
    }

    #[test]
    fn database_settings_are_read_with_pool_defaults() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/quill"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("DB_SQLX_LOGGING", "true"),
        ]);
        let db = config.database.unwrap();
        assert_eq!(db.url, "postgres://localhost/quill");
        assert_eq!(db.max_connections, 20);
        assert_eq!(db.min_connections, 10);
        assert!(db.sqlx_logging);
    }

    #[test]
    fn bad_or_zero_service_values_fall_back() {
        let config = config_from(&[
            ("READING_WPM", "0"),
            ("DEFAULT_PAGE_SIZE", "lots"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.services.words_per_minute, DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(config.services.default_page_size, DEFAULT_PAGE_SIZE);
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        assert!(config_from(&[("DATABASE_URL", "  ")]).database.is_none());
    }
}
