//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `security`: API key for protected routes
//! - `database`: connection pool settings
//! - `integrations`: FMCSA carrier registry
//!
//! Sources are layered, later ones winning: built-in defaults, an optional
//! `config.toml`, `FREIGHTGATE_*` environment variables (nested keys joined
//! with `__`, e.g. `FREIGHTGATE_DATABASE__POOL_SIZE`), and finally the flat
//! variable names used by existing deployments (`API_KEY`, `DATABASE_URL`,
//! `DB_POOL_SIZE`, ...).

mod database;
mod integrations;
mod security;
mod server;

use config::{ConfigBuilder, ConfigError, builder::DefaultState};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use database::DatabaseConfig;
pub use integrations::FmcsaAppConfig;
pub use security::SecurityConfig;
pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Flat environment variables mapped onto config keys
const FLAT_OVERRIDES: [(&str, &str); 7] = [
    ("API_KEY", "security.api_key"),
    ("FMCSA_API_KEY", "fmcsa.web_key"),
    ("DATABASE_URL", "database.url"),
    ("DB_POOL_SIZE", "database.pool_size"),
    ("DB_MAX_OVERFLOW", "database.max_overflow"),
    ("DB_POOL_TIMEOUT", "database.pool_timeout_secs"),
    ("DB_POOL_RECYCLE", "database.pool_recycle_secs"),
];

/// Comma-separated list of allowed CORS origins
const CORS_ORIGINS_VAR: &str = "CORS_ORIGINS";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Security configuration
    #[serde(default)]
    pub security: SecurityConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// FMCSA carrier registry configuration
    #[serde(default)]
    pub fmcsa: FmcsaAppConfig,
}

impl AppConfig {
    /// Load configuration from `.env`, an optional file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }

        let builder = Self::defaults()?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., FREIGHTGATE_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("FREIGHTGATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder, |name| std::env::var(name).ok())
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "sqlite:freightgate.db")?
            .set_default("fmcsa.base_url", "https://mobile.fmcsa.dot.gov/qc/services")
    }

    /// Apply the flat overrides found through `lookup` and deserialize
    fn build<F>(builder: ConfigBuilder<DefaultState>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = builder;
        for (var, key) in FLAT_OVERRIDES {
            builder = builder.set_override_option(key, lookup(var).filter(|v| !v.is_empty()))?;
        }

        let origins = lookup(CORS_ORIGINS_VAR).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        });
        builder = builder.set_override_option("server.allowed_origins", origins)?;

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use config::FileFormat;
    use secrecy::ExposeSecret;

    use super::*;

    fn load_with(toml: &str, vars: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let builder = AppConfig::defaults()
            .unwrap()
            .add_source(config::File::from_str(toml, FileFormat::Toml));

        AppConfig::build(builder, |name| env.get(name).cloned()).unwrap()
    }

    #[test]
    fn defaults_apply_without_sources() {
        let config = load_with("", &[]);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert!(config.server.allowed_origins.is_empty());
        assert_eq!(config.server.log_format, "text");
        assert!(config.security.api_key.is_none());
        assert_eq!(config.database.url, "sqlite:freightgate.db");
        assert_eq!(config.database.pool_size, 5);
        assert_eq!(config.database.max_overflow, 2);
        assert_eq!(config.database.pool_timeout_secs, 30);
        assert_eq!(config.database.pool_recycle_secs, 1800);
        assert!(config.database.run_migrations);
        assert_eq!(
            config.fmcsa.base_url,
            "https://mobile.fmcsa.dot.gov/qc/services"
        );
        assert!(config.fmcsa.web_key.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = load_with(
            r#"
            [server]
            port = 9090
            allowed_origins = ["https://app.example.com"]

            [database]
            pool_size = 10
            "#,
            &[],
        );

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.allowed_origins, vec!["https://app.example.com"]);
        assert_eq!(config.database.pool_size, 10);
        assert_eq!(config.database.max_overflow, 2);
    }

    #[test]
    fn flat_variables_override_file() {
        let config = load_with(
            r#"
            [database]
            url = "sqlite:from-file.db"
            pool_size = 10
            "#,
            &[
                ("DATABASE_URL", "sqlite::memory:"),
                ("DB_POOL_SIZE", "3"),
                ("DB_MAX_OVERFLOW", "0"),
                ("DB_POOL_TIMEOUT", "5"),
                ("DB_POOL_RECYCLE", "60"),
            ],
        );

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.pool_size, 3);
        assert_eq!(config.database.max_overflow, 0);
        assert_eq!(config.database.pool_timeout_secs, 5);
        assert_eq!(config.database.pool_recycle_secs, 60);
    }

    #[test]
    fn secrets_are_read_from_flat_variables() {
        let config = load_with("", &[("API_KEY", "s3cret"), ("FMCSA_API_KEY", "web-key")]);

        assert_eq!(
            config.security.api_key.as_ref().map(|k| k.expose_secret()),
            Some("s3cret")
        );
        assert!(config.security.has_api_key());
        assert_eq!(
            config.fmcsa.to_fmcsa_config().web_key.as_deref(),
            Some("web-key")
        );
    }

    #[test]
    fn empty_flat_variable_is_ignored() {
        let config = load_with("", &[("API_KEY", "")]);
        assert!(!config.security.has_api_key());
    }

    #[test]
    fn cors_origins_are_split_on_commas() {
        let config = load_with(
            "",
            &[(
                "CORS_ORIGINS",
                "https://a.example.com, https://b.example.com,",
            )],
        );

        assert_eq!(
            config.server.allowed_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert!(!config.server.allows_any_origin());
    }

    #[test]
    fn secrets_are_not_serialized() {
        let config = load_with("", &[("API_KEY", "s3cret"), ("FMCSA_API_KEY", "web-key")]);
        let json = serde_json::to_string(&config).unwrap();

        assert!(!json.contains("s3cret"));
        assert!(!json.contains("web-key"));
    }

    #[test]
    fn secrets_are_not_debug_printed() {
        let config = load_with("", &[("API_KEY", "s3cret")]);
        assert!(!format!("{config:?}").contains("s3cret"));
    }

    #[test]
    fn database_pool_bounds() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections(), 7);
        assert_eq!(config.acquire_timeout().as_secs(), 30);
        assert_eq!(config.recycle_after().as_secs(), 1800);

        let memory = DatabaseConfig::in_memory();
        assert_eq!(memory.max_connections(), 1);
    }

    #[test]
    fn server_bind_address() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert!(config.allows_any_origin());
    }
}
