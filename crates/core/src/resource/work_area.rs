//! Scratch area holding private copies of archive packages.
//!
//! Archives are never read in place: each one is copied into its own
//! `kinload-*` directory first, so the original file stays unlocked and can
//! be replaced while the tree is live. Scratch directories live as long as
//! the work area; directories left behind by a crashed process are removed
//! by [`WorkArea::sweep_once`] when the first tree of a process starts on
//! the same work path. Later trees never sweep it, since the scratch copies
//! found there may belong to a live tree.

use kinload_api::{LoaderError, LoaderResult, Locator};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Name prefix of every scratch directory.
pub const WORK_DIR_PREFIX: &str = "kinload-";

/// Canonical work paths already swept by this process.
static SWEPT: OnceLock<Mutex<HashSet<PathBuf>>> = OnceLock::new();

#[derive(Debug)]
pub struct WorkArea {
    base: PathBuf,
    configured: bool,
    scratch: Mutex<Vec<PathBuf>>,
}

impl WorkArea {
    /// Use `work_path` when it is set and writable, else the platform temp
    /// directory.
    pub fn new(work_path: Option<&Path>) -> Self {
        let (base, configured) = match work_path {
            Some(path) if is_writable_dir(path) => (path.to_path_buf(), true),
            Some(path) => {
                let fallback = std::env::temp_dir();
                warn!(
                    "Work path {} is not writable, using {}",
                    path.display(),
                    fallback.display()
                );
                (fallback, false)
            }
            None => (std::env::temp_dir(), false),
        };

        Self {
            base,
            configured,
            scratch: Mutex::new(Vec::new()),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Whether the base is an explicitly configured work path.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Scratch directories created so far.
    pub fn scratch_dirs(&self) -> Vec<PathBuf> {
        self.scratch.lock().clone()
    }

    /// [`sweep`](Self::sweep), unless this process already swept the same
    /// work path.
    pub fn sweep_once(&self) -> usize {
        if !self.configured {
            return 0;
        }

        let key = fs::canonicalize(&self.base).unwrap_or_else(|_| self.base.clone());
        let first = SWEPT.get_or_init(Default::default).lock().insert(key);
        if first { self.sweep() } else { 0 }
    }

    /// Remove `kinload-*` directories left in the configured work path by
    /// earlier runs. Only the top level is inspected. Never fails; returns
    /// the number of directories removed.
    ///
    /// The platform temp directory is shared with other processes and is
    /// never swept.
    pub fn sweep(&self) -> usize {
        if !self.configured {
            return 0;
        }

        let entries = match fs::read_dir(&self.base) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Unable to sweep work path {}: {}", self.base.display(), e);
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let stale = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(WORK_DIR_PREFIX))
                && entry.file_type().is_ok_and(|t| t.is_dir());
            if !stale {
                continue;
            }

            let path = entry.path();
            match fs::remove_dir_all(&path) {
                Ok(()) => {
                    debug!("Removed stale scratch directory {}", path.display());
                    removed += 1;
                }
                Err(e) => warn!("Unable to remove {}: {}", path.display(), e),
            }
        }
        removed
    }

    /// Copy `archive` into a fresh scratch directory and return the copy.
    pub fn copy_archive(&self, archive: &Path) -> LoaderResult<PathBuf> {
        let locator = Locator::file(archive);
        let file_name = archive
            .file_name()
            .ok_or_else(|| LoaderError::InvalidLocation(archive.display().to_string()))?;

        let dir = tempfile::Builder::new()
            .prefix(WORK_DIR_PREFIX)
            .tempdir_in(&self.base)
            .map_err(|e| LoaderError::invalid_resource(&locator, e))?
            .keep();
        self.scratch.lock().push(dir.clone());

        let copy = dir.join(file_name);
        fs::copy(archive, &copy).map_err(|e| LoaderError::invalid_resource(&locator, e))?;
        debug!("Copied {} to {}", archive.display(), copy.display());
        Ok(copy)
    }
}

impl Drop for WorkArea {
    fn drop(&mut self) {
        for dir in self.scratch.get_mut().drain(..) {
            if let Err(e) = fs::remove_dir_all(&dir) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Unable to remove scratch directory {}: {}", dir.display(), e);
                }
            }
        }
    }
}

fn is_writable_dir(path: &Path) -> bool {
    fs::create_dir_all(path).is_ok()
        && fs::metadata(path).is_ok_and(|m| m.is_dir() && !m.permissions().readonly())
}
