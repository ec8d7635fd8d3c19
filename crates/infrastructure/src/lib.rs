//! Infrastructure layer - Adapters for external systems
//!
//! Implements the chat-completion port on top of the model client, loads
//! configuration and script tables, and sets up logging.

pub mod adapters;
pub mod config;
pub mod retry;
pub mod script_table_loader;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, Environment, LogFormat, LoggingConfig, PlaybookConfig, RetryAppConfig, ServerConfig,
};
pub use retry::{RetryConfig, RetryResult, Retryable, retry, with_retry};
pub use script_table_loader::{
    ScriptTableError, load_script_table, parse_script_table, script_table_from_config,
};
pub use telemetry::{TelemetryError, init_logging};
