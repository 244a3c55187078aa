//! Discovery engine: fills a node's resource cache from a directory tree or
//! an archive package.

use super::entries::ResourceEntries;
use super::manager::ResourceManager;
use super::work_area::WorkArea;
use crate::naming::is_archive;
use kinload_api::{LoaderError, LoaderResult, Locator, SiblingJoiner};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

/// Resource manager bound to one directory or archive location.
///
/// Every scan builds a complete table before committing it, so a failed scan
/// never leaves a half-populated cache behind.
#[derive(Debug)]
pub struct LocalResourceManager {
    manager: ResourceManager,
    location: Option<PathBuf>,
    work_area: Arc<WorkArea>,
}

impl LocalResourceManager {
    /// Bind to `location` (canonicalized when it exists). Nothing is scanned
    /// until [`scan`](Self::scan).
    pub fn new(location: Option<&Path>, work_area: Arc<WorkArea>) -> Self {
        let location = location.map(|path| {
            fs::canonicalize(path)
                .or_else(|_| std::path::absolute(path))
                .unwrap_or_else(|_| path.to_path_buf())
        });

        Self {
            manager: ResourceManager::new(),
            location,
            work_area,
        }
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn manager(&self) -> &ResourceManager {
        &self.manager
    }

    pub fn work_area(&self) -> &Arc<WorkArea> {
        &self.work_area
    }

    pub fn get(&self, name: &str) -> Option<Locator> {
        self.manager.get(name)
    }

    pub fn number_of_resources(&self) -> usize {
        self.manager.number_of_resources()
    }

    pub fn release(&self) {
        self.manager.release();
    }

    /// Clear, then scan the location again from scratch.
    pub fn reset(&self, joiner: &dyn SiblingJoiner) -> LoaderResult<()> {
        self.manager.release();
        self.scan(joiner)
    }

    /// Populate the cache from the location.
    ///
    /// A missing or unreadable location yields an empty cache. A location
    /// that exists but is neither a directory nor an archive is rejected.
    /// Archives found inside a directory are not expanded here; each one is
    /// handed to `joiner` after the directory table is committed, and a
    /// failed join is logged without aborting the scan.
    pub fn scan(&self, joiner: &dyn SiblingJoiner) -> LoaderResult<()> {
        let Some(location) = self.location.as_deref() else {
            return Ok(());
        };

        let metadata = match fs::metadata(location) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Resource location {} is not available: {}", location.display(), e);
                return Ok(());
            }
        };

        if metadata.is_dir() {
            if let Err(e) = fs::read_dir(location) {
                warn!("Resource location {} is not readable: {}", location.display(), e);
                return Ok(());
            }

            let (entries, archives) = scan_directory(location);
            debug!(
                "Found {} resources and {} nested archives in {}",
                entries.len(),
                archives.len(),
                location.display()
            );
            self.manager.commit(entries);

            for archive in archives {
                if let Err(e) = joiner.join_sibling(&archive) {
                    warn!("Unable to attach nested archive {}: {}", archive.display(), e);
                }
            }
            Ok(())
        } else if is_archive(location) {
            let entries = self.scan_archive(location)?;
            debug!("Found {} entries in {}", entries.len(), location.display());
            self.manager.commit(entries);
            Ok(())
        } else {
            Err(LoaderError::InvalidLocation(format!(
                "{} is neither a directory nor an archive package",
                location.display()
            )))
        }
    }

    /// Index a scratch copy of `archive`; locators point into the copy.
    fn scan_archive(&self, archive: &Path) -> LoaderResult<ResourceEntries> {
        let origin = Locator::file(archive);
        let copy = self.work_area.copy_archive(archive)?;

        let file = File::open(&copy).map_err(|e| LoaderError::invalid_resource(&origin, e))?;
        let mut zip = ZipArchive::new(BufReader::new(file))
            .map_err(|e| LoaderError::invalid_resource(&origin, e))?;

        let mut entries = ResourceEntries::new();
        for index in 0..zip.len() {
            let name = zip
                .by_index(index)
                .map_err(|e| LoaderError::invalid_resource(&origin, e))?
                .name()
                .to_string();
            entries.put(&name, Locator::archive_entry(&copy, name.clone()));
        }
        Ok(entries)
    }
}

impl AsRef<ResourceManager> for LocalResourceManager {
    fn as_ref(&self) -> &ResourceManager {
        &self.manager
    }
}

/// Walk `root`, registering every file and directory below it by its
/// `/`-separated relative name. Archive files are registered too and also
/// returned for sibling creation.
///
/// Symbolic links are followed. Entries that cannot be read, including link
/// loops, are logged and skipped.
fn scan_directory(root: &Path) -> (ResourceEntries, Vec<PathBuf>) {
    let mut entries = ResourceEntries::new();
    let mut archives = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root);
                warn!("Skipping unreadable entry {}: {}", path.display(), e);
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_file() && is_archive(entry.path()) {
            archives.push(entry.path().to_path_buf());
        }
        entries.put(&name, Locator::file(entry.path()));
    }

    (entries, archives)
}
