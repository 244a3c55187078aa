#![allow(dead_code)]

use kinload_api::{BoxError, FallbackResolver, Locator, Materializer, RawUnit, UnitRef};
use kinload_core::ModuleLoader;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Scratch application layout: `<temp>/app` for locations, `<temp>/work`
/// for archive copies.
pub struct Fixture {
    pub temp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            temp: tempfile::tempdir().unwrap(),
        }
    }

    pub fn app(&self) -> PathBuf {
        self.temp.path().join("app")
    }

    pub fn work(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    /// Write `contents` to `app/<relative>`, creating parents.
    pub fn file(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.app().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.app().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write an archive at `app/<relative>` holding `entries` in order.
    pub fn archive(&self, relative: &str, entries: &[&str]) -> PathBuf {
        let path = self.app().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        write_zip(&path, entries);
        path
    }

    /// Bare root with no configured locations.
    pub fn root(&self) -> ModuleLoader {
        ModuleLoader::builder()
            .with_work_path(self.work())
            .build()
            .unwrap()
    }
}

/// Every entry's bytes are its own name.
pub fn write_zip(path: &Path, entries: &[&str]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    for entry in entries {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(entry.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
}

pub fn canonical(path: &Path) -> Locator {
    Locator::file(fs::canonicalize(path).unwrap())
}

/// Counts every `define` call.
#[derive(Default)]
pub struct CountingMaterializer {
    pub defined: AtomicUsize,
}

impl CountingMaterializer {
    pub fn count(&self) -> usize {
        self.defined.load(Ordering::SeqCst)
    }
}

impl Materializer for CountingMaterializer {
    fn define(&self, name: &str, bytes: &[u8]) -> Result<UnitRef, BoxError> {
        self.defined.fetch_add(1, Ordering::SeqCst);
        // Widen the race window for concurrent callers.
        std::thread::sleep(std::time::Duration::from_millis(5));
        Ok(Arc::new(RawUnit {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        }))
    }
}

/// Host loader backed by fixed tables.
#[derive(Default)]
pub struct MapFallback {
    pub units: HashMap<String, UnitRef>,
    pub resources: HashMap<String, Locator>,
}

impl MapFallback {
    pub fn with_unit(mut self, name: &str) -> Self {
        let unit: UnitRef = Arc::new(RawUnit {
            name: name.to_string(),
            bytes: b"host".to_vec(),
        });
        self.units.insert(name.to_string(), unit);
        self
    }

    pub fn with_resource(mut self, name: &str, locator: Locator) -> Self {
        self.resources.insert(name.to_string(), locator);
        self
    }
}

impl FallbackResolver for MapFallback {
    fn resolve_unit(&self, qualified_name: &str) -> Option<UnitRef> {
        self.units.get(qualified_name).cloned()
    }

    fn resource(&self, name: &str) -> Option<Locator> {
        self.resources.get(name).cloned()
    }
}

pub fn resource_names(loader: &ModuleLoader) -> Vec<String> {
    loader.resource_manager().manager().resource_names()
}
