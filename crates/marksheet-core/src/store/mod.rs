//! Store management for marksheet
//!
//! The store is the `.marksheet/` directory holding `config.toml` and the
//! SQLite database.

pub mod config;
pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use crate::db::Database;
use crate::error::{MarksheetError, Result};
use crate::import::{import_sheet, ImportReport};
use crate::sheet::Sheet;
use crate::weights::{WeightConfig, WeightRegistry};
use config::StoreConfig;
use paths::{CONFIG_FILE, DEFAULT_STORE_DIR};

/// The marksheet store
#[derive(Debug)]
pub struct Store {
    /// Root path of the store (the `.marksheet` directory itself)
    root: PathBuf,
    /// Store configuration
    config: StoreConfig,
    /// Built-in weights with configured overrides applied
    registry: WeightRegistry,
    /// SQLite database
    db: Database,
}

impl Store {
    /// Discover a store by walking up from the given root directory
    pub fn discover(root: &Path) -> Result<Self> {
        let store_path = paths::discover_store(root)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(MarksheetError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            StoreConfig::default()
        };
        let registry = config.registry()?;
        let db = Database::open(path)?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            registry,
            db,
        })
    }

    /// Initialize a new store under the given project root.
    pub fn init(project_root: &Path) -> Result<Self> {
        Self::init_at(&project_root.join(DEFAULT_STORE_DIR))
    }

    /// Initialize a store at an explicit store root path.
    ///
    /// Idempotent: an existing config is loaded, never rewritten.
    pub fn init_at(store_root: &Path) -> Result<Self> {
        fs::create_dir_all(store_root)?;

        let config_path = store_root.join(CONFIG_FILE);
        if !config_path.exists() {
            StoreConfig::default().save(&config_path)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
        }

        Self::open(store_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn registry(&self) -> &WeightRegistry {
        &self.registry
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Fill in the configured default phase/review for whatever was not given
    pub fn resolve_slice(&self, phase: Option<u32>, review: Option<u32>) -> (u32, u32) {
        (
            phase.unwrap_or(self.config.default_phase),
            review.unwrap_or(self.config.default_review),
        )
    }

    /// Weight configuration for a slice, or `UnknownWeightConfig`
    pub fn weight_config(&self, phase: u32, review: u32) -> Result<&WeightConfig> {
        self.registry.require(phase, review)
    }

    /// Import one sheet into the (phase, review) slice
    pub fn import(&mut self, sheet: &Sheet, phase: u32, review: u32) -> Result<ImportReport> {
        import_sheet(&mut self.db, &self.registry, sheet, phase, review)
    }
}
