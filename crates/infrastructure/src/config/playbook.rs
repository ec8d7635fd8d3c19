//! Playbook engine configuration.

use std::path::PathBuf;

use domain::Tone;
use serde::{Deserialize, Serialize};

/// Playbook engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybookConfig {
    /// Tone used when a request does not ask for one
    #[serde(default)]
    pub default_tone: Tone,

    /// TOML file replacing the built-in script table
    ///
    /// Lanes and openers the file leaves out keep their built-in content.
    #[serde(default)]
    pub script_table_path: Option<PathBuf>,
}
