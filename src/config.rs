//! Learner configuration, read from a TOML file.
//!
//! ```toml
//! inventory_symbol = "I"
//! player_symbol = "P"
//! diff_experiences = true
//! log_filter = "schemata=debug"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemataConfig {
    /// Name of the symbol standing for the agent's inventory.
    #[serde(default = "default_inventory_symbol")]
    pub inventory_symbol: String,
    /// Name of the symbol standing for the player.
    #[serde(default = "default_player_symbol")]
    pub player_symbol: String,
    /// Reduce raw experiences to the facts that changed before learning.
    #[serde(default = "default_diff_experiences")]
    pub diff_experiences: bool,
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_inventory_symbol() -> String {
    "I".into()
}
fn default_player_symbol() -> String {
    "P".into()
}
fn default_diff_experiences() -> bool {
    true
}
fn default_log_filter() -> String {
    "info".into()
}

impl Default for SchemataConfig {
    fn default() -> Self {
        Self {
            inventory_symbol: default_inventory_symbol(),
            player_symbol: default_player_symbol(),
            diff_experiences: default_diff_experiences(),
            log_filter: default_log_filter(),
        }
    }
}

impl SchemataConfig {
    /// Load from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
