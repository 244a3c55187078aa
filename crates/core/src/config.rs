//! Loader configuration, read from JSON and overlaid with the environment.

use kinload_api::{LoaderError, LoaderResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`LoaderConfig::work_path`].
pub const WORK_PATH_ENV: &str = "KINLOAD_WORK_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderConfig {
    /// Directories or archive packages, in search order. `file:` URLs and
    /// `classpath:` locations are accepted.
    pub resource_locations: Vec<String>,
    /// Relative locations are resolved against this path.
    pub base_path: Option<PathBuf>,
    /// Where archive copies are made. Stale copies here are swept at start.
    pub work_path: Option<PathBuf>,
    pub exclude_packages: Vec<String>,
    pub exclude_classes: Vec<String>,
}

impl LoaderConfig {
    pub fn from_json(json: &str) -> LoaderResult<Self> {
        serde_json::from_str(json).map_err(|e| LoaderError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> LoaderResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json).map_err(|e| match e {
            LoaderError::Config(msg) => LoaderError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Apply `KINLOAD_WORK_PATH` when it is set and not empty.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(work_path) = lookup(WORK_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            self.work_path = Some(PathBuf::from(work_path));
        }
        self
    }
}
