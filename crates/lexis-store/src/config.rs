//! Loader configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the directory that holds `wordnet.jsonl`.
pub const DATA_DIR_ENV: &str = "LEXIS_DATA_DIR";

pub const PRIMARY_FILE_NAME: &str = "wordnet.jsonl";
pub const SENSES_FILE_NAME: &str = "wordnet_senses.jsonl";
pub const EXCEPTIONS_FILE_NAME: &str = "wordnet_exceptions.jsonl";

pub const DEFAULT_CACHE_SIZE: usize = 1000;

/// Configuration for [`crate::WordNetLoader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Primary JSON Lines file. Sidecars are looked up in the same directory.
    pub data_path: PathBuf,
    /// Decode records on demand instead of up front.
    pub lazy: bool,
    /// Load during construction. Ignored in lazy mode.
    pub autoload: bool,
    /// LRU capacity for lazy mode. Fixed once the loader is built.
    pub cache_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            lazy: false,
            autoload: true,
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl LoaderConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    pub fn autoload(mut self, autoload: bool) -> Self {
        self.autoload = autoload;
        self
    }

    pub fn cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    pub fn senses_path(&self) -> PathBuf {
        sidecar_path(&self.data_path, SENSES_FILE_NAME)
    }

    pub fn exceptions_path(&self) -> PathBuf {
        sidecar_path(&self.data_path, EXCEPTIONS_FILE_NAME)
    }
}

fn sidecar_path(primary: &Path, name: &str) -> PathBuf {
    match primary.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// `$LEXIS_DATA_DIR/wordnet.jsonl`, falling back to `./data/wordnet.jsonl`.
pub fn default_data_path() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        let dir = dir.trim();
        if !dir.is_empty() {
            return PathBuf::from(dir).join(PRIMARY_FILE_NAME);
        }
    }
    PathBuf::from("data").join(PRIMARY_FILE_NAME)
}
