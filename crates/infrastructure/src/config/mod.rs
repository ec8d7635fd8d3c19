//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `logging`: log format and filter
//! - `playbook`: default tone and script table location
//! - `resilience`: retry settings for model calls

mod logging;
mod playbook;
mod resilience;
mod server;

use std::fmt;
use std::path::Path;

use ai_core::InferenceConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use logging::{LogFormat, LoggingConfig};
pub use playbook::PlaybookConfig;
pub use resilience::RetryAppConfig;
pub use server::ServerConfig;

/// Prefix for environment overrides, e.g. `INNERNODE_SERVER__PORT`
pub const ENV_PREFIX: &str = "INNERNODE";

/// Variable consulted when no API key is configured
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - internal error details are returned
    #[default]
    Development,
    /// Production environment - internal error details are hidden
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat-completion model configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Playbook engine configuration
    #[serde(default)]
    pub playbook: PlaybookConfig,

    /// Retry configuration for model calls
    #[serde(default)]
    pub retry: Option<RetryAppConfig>,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::with_name("config").required(false))
    }

    /// Load configuration from a specific file plus the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::from(path).required(true))
    }

    fn load_with<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("inference.base_url", "https://api.openai.com")?
            .set_default("inference.default_model", "gpt-4.1-mini")?
            .add_source(file)
            // Override with environment variables (e.g., INNERNODE_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let mut app_config: Self = builder.build()?.try_deserialize()?;

        if app_config.inference.api_key.is_none() {
            if let Some(key) = std::env::var(OPENAI_API_KEY_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty())
            {
                debug!("Using API key from {OPENAI_API_KEY_VAR}");
                app_config.inference.api_key = Some(SecretString::from(key));
            }
        }

        Ok(app_config)
    }

    /// Effective environment
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Whether running in production
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment() == Environment::Production
    }

    /// Configuration problems worth logging at startup
    #[must_use]
    pub fn startup_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.inference.has_api_key() {
            warnings.push(format!(
                "No model API key configured; replies come from the offline adapter. Set {OPENAI_API_KEY_VAR} to enable the model."
            ));
        }

        if self.is_production() && self.server.allowed_origins.is_empty() {
            warnings.push(
                "No allowed CORS origins configured in production; cross-origin requests are rejected"
                    .to_string(),
            );
        }

        if self.is_production() && self.inference.base_url.starts_with("http://") {
            warnings.push(format!(
                "Model endpoint {} is not using TLS",
                self.inference.base_url
            ));
        }

        warnings
    }
}
