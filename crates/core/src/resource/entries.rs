//! Ordered name -> locator map.

use crate::naming::normalize_resource_name;
use indexmap::IndexMap;
use kinload_api::Locator;

/// Insertion-ordered resource table keyed by normalized resource name.
#[derive(Debug, Default, Clone)]
pub struct ResourceEntries {
    entries: IndexMap<String, Locator>,
}

impl ResourceEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten name keeps its original position.
    pub fn put(&mut self, name: &str, locator: Locator) -> Option<Locator> {
        let name = normalize_resource_name(name).into_owned();
        self.entries.insert(name, locator)
    }

    pub fn get(&self, name: &str) -> Option<&Locator> {
        self.entries.get(normalize_resource_name(name).as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn locators(&self) -> impl Iterator<Item = &Locator> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Locator)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
