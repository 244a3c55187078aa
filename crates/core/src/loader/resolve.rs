//! Sibling-first lookup of compiled units and resources.

use super::ModuleLoader;
use crate::naming::class_name_to_resource_name;
use crate::resource::{ResourceManager, read_locator};
use kinload_api::{LoaderError, LoaderResult, Locator, UnitRef};
use tracing::{debug, trace};

impl ModuleLoader {
    /// Resolve a compiled unit by qualified name.
    ///
    /// Looks through the whole local tree first, in member order, unless the
    /// name is excluded on this node; then asks the fallback resolver. A name
    /// is materialized at most once per node, and every later call returns
    /// the same unit.
    pub fn resolve_compiled_unit(&self, qualified_name: &str) -> LoaderResult<UnitRef> {
        self.node
            .with_unit_lock(qualified_name, || self.resolve_locked(qualified_name))
    }

    fn resolve_locked(&self, qualified_name: &str) -> LoaderResult<UnitRef> {
        if let Some(unit) = self.defined_unit(qualified_name) {
            return Ok(unit);
        }

        if let Some(unit) = self.define_local(qualified_name)? {
            return Ok(unit);
        }

        if let Some(unit) = self.tree.fallback.resolve_unit(qualified_name) {
            trace!("Resolved {} through the fallback resolver", qualified_name);
            return Ok(unit);
        }

        Err(LoaderError::UnitNotFound(qualified_name.to_string()))
    }

    /// Unit already materialized by this node, if any.
    pub fn defined_unit(&self, qualified_name: &str) -> Option<UnitRef> {
        self.node
            .defined
            .get(qualified_name)
            .map(|unit| UnitRef::clone(&unit))
    }

    fn define_local(&self, qualified_name: &str) -> LoaderResult<Option<UnitRef>> {
        if self.is_excluded(qualified_name) {
            trace!("{} is excluded on loader {}", qualified_name, self.id());
            return Ok(None);
        }

        let resource_name = class_name_to_resource_name(qualified_name);
        let Some(locator) = ResourceManager::search_across_siblings(&resource_name, self.members())
        else {
            return Ok(None);
        };

        let bytes = read_locator(&locator)?;
        let unit = self
            .tree
            .materializer
            .define(qualified_name, &bytes)
            .map_err(|source| LoaderError::Materialize {
                name: qualified_name.to_string(),
                source,
            })?;

        debug!("Defined {} from {}", qualified_name, locator);
        self.node
            .defined
            .insert(qualified_name.to_string(), UnitRef::clone(&unit));
        Ok(Some(unit))
    }

    /// First match for `name` in the local tree, then the fallback resolver.
    pub fn resolve_resource(&self, name: &str) -> Option<Locator> {
        self.find_resource(name)
            .or_else(|| self.tree.fallback.resource(name))
    }

    /// First match for `name` in the local tree only.
    pub fn find_resource(&self, name: &str) -> Option<Locator> {
        ResourceManager::search_across_siblings(name, self.members())
    }

    /// Every match for `name` in the local tree, in member order. Lazy.
    pub fn find_resources(&self, name: &str) -> impl Iterator<Item = Locator> + use<> {
        ResourceManager::search_all_across_siblings(name, self.members(), None::<Vec<Locator>>)
    }

    /// Every match in the local tree followed by the fallback's matches.
    pub fn resolve_resources(&self, name: &str) -> Vec<Locator> {
        let fallback = self.tree.fallback.resources(name);
        ResourceManager::search_all_across_siblings(name, self.members(), Some(fallback)).collect()
    }

    /// Every resource of every member, in member order.
    pub fn all_resources(&self) -> impl Iterator<Item = Locator> + use<> {
        ResourceManager::all_across_siblings(self.members())
    }

    /// Like [`all_resources`](Self::all_resources), without entries that
    /// live inside archive packages.
    pub fn file_resources(&self) -> Vec<Locator> {
        self.all_resources()
            .filter(|locator| !locator.is_archive_entry())
            .collect()
    }
}
