//! Script table loading
//!
//! Reads a TOML script table from disk. Lanes and openers the file leaves out
//! are taken from the built-in table, and the merged table is validated
//! before the engine sees it.

use std::path::{Path, PathBuf};

use application::ScriptTable;
use domain::DomainError;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::PlaybookConfig;

/// Errors raised while loading a script table
#[derive(Debug, Error)]
pub enum ScriptTableError {
    /// File could not be read
    #[error("Failed to read script table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid script table
    #[error("Failed to parse script table: {0}")]
    Parse(#[from] toml::de::Error),

    /// Table parsed but contains blank content
    #[error("Invalid script table: {0}")]
    Invalid(#[from] DomainError),
}

/// Parse a TOML script table and complete it from the built-in content
pub fn parse_script_table(contents: &str) -> Result<ScriptTable, ScriptTableError> {
    let parsed: ScriptTable = toml::from_str(contents)?;
    let missing = parsed.missing_lanes();
    if !missing.is_empty() {
        debug!(?missing, "Script table leaves lanes out; using built-in content");
    }

    let table = parsed.fill_missing_from(&ScriptTable::builtin());
    table.validate()?;
    Ok(table)
}

/// Load a script table from a TOML file
pub fn load_script_table(path: &Path) -> Result<ScriptTable, ScriptTableError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScriptTableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_script_table(&contents)?;
    info!(path = %path.display(), "Loaded script table");
    Ok(table)
}

/// Script table selected by the playbook configuration
pub fn script_table_from_config(config: &PlaybookConfig) -> Result<ScriptTable, ScriptTableError> {
    config
        .script_table_path
        .as_deref()
        .map_or_else(|| Ok(ScriptTable::builtin()), load_script_table)
}
