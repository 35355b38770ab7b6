//! Runtime configuration loaded from an optional JSON file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogPath;
use crate::model::Biographies;

const DEFAULT_CATALOG_ROOT: &str = "audio";
const DEFAULT_LOG_DIR: &str = ".logs";
const DEFAULT_LOG_FILE_PREFIX: &str = "recital-rs";
const DEFAULT_LOG_FILTER: &str = "recital_rs=debug,warn";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root prefix of the catalog hierarchy.
    pub catalog_root: String,
    /// JSON object of extra biographies merged over the built-in ones.
    pub biographies_path: Option<PathBuf>,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
    /// Used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_root: DEFAULT_CATALOG_ROOT.to_string(),
            biographies_path: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn catalog_path(&self) -> CatalogPath {
        CatalogPath::new(&self.catalog_root)
    }

    /// Built-in biographies, extended from `biographies_path` when set.
    pub fn biographies(&self) -> Result<Biographies> {
        let mut biographies = Biographies::builtin();
        if let Some(path) = &self.biographies_path {
            let count = biographies.merge_from_file(path)?;
            tracing::info!(path = %path.display(), count, "Loaded extra biographies");
        }
        Ok(biographies)
    }
}
