//! Store configuration for marksheet
//!
//! Configuration is stored in `.marksheet/config.toml`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MarksheetError, Result};
use crate::weights::{WeightConfig, WeightRegistry};

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Phase used when a command is not given `--phase`
    #[serde(default = "default_slice")]
    pub default_phase: u32,

    /// Review used when a command is not given `--review`
    #[serde(default = "default_slice")]
    pub default_review: u32,

    /// Weight configurations layered over the built-in registry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<WeightConfig>,
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_slice() -> u32 {
    1
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            default_phase: 1,
            default_review: 1,
            weights: Vec::new(),
        }
    }
}

impl StoreConfig {
    /// Built-in registry with this configuration's `[[weights]]` applied
    pub fn registry(&self) -> Result<WeightRegistry> {
        WeightRegistry::builtin().with_overrides(&self.weights)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content)?;

        if config.version > STORE_FORMAT_VERSION {
            return Err(MarksheetError::InvalidStore {
                reason: format!(
                    "config version {} is newer than supported version {}",
                    config.version, STORE_FORMAT_VERSION
                ),
            });
        }

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MarksheetError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}
