//! Per-node resource cache and the tree-wide search over sibling members.

use super::entries::ResourceEntries;
use kinload_api::Locator;
use parking_lot::RwLock;

/// Resource cache owned by exactly one loader node.
///
/// Readers are never blocked for long: every read takes a short read lock and
/// returns owned data. A reader racing a reset may observe an empty cache.
#[derive(Debug, Default)]
pub struct ResourceManager {
    entries: RwLock<ResourceEntries>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, name: &str, locator: Locator) {
        self.entries.write().put(name, locator);
    }

    pub fn get(&self, name: &str) -> Option<Locator> {
        self.entries.read().get(name).cloned()
    }

    /// Every locator held by this node only, in insertion order.
    ///
    /// Each call takes a fresh snapshot, so the sequence can be restarted by
    /// calling again.
    pub fn resources(&self) -> std::vec::IntoIter<Locator> {
        let snapshot: Vec<Locator> = self.entries.read().locators().cloned().collect();
        snapshot.into_iter()
    }

    pub fn resource_names(&self) -> Vec<String> {
        self.entries
            .read()
            .names()
            .map(str::to_string)
            .collect()
    }

    pub fn number_of_resources(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all entries.
    pub fn release(&self) {
        self.entries.write().clear();
    }

    /// Same as [`release`](Self::release); there is no location to re-scan at
    /// this level.
    pub fn reset(&self) {
        self.release();
    }

    /// Swap in a fully built table in one step.
    pub(crate) fn commit(&self, entries: ResourceEntries) {
        *self.entries.write() = entries;
    }

    /// First match for `name`, in member order.
    pub fn search_across_siblings<I>(name: &str, members: I) -> Option<Locator>
    where
        I: IntoIterator,
        I::Item: AsRef<ResourceManager>,
    {
        members
            .into_iter()
            .find_map(|member| member.as_ref().get(name))
    }

    /// Every match for `name`, in member order, followed by `fallback`.
    ///
    /// The sequence is lazy: members are consulted as it is pulled.
    pub fn search_all_across_siblings<I, F>(
        name: &str,
        members: I,
        fallback: Option<F>,
    ) -> impl Iterator<Item = Locator> + use<I, F>
    where
        I: IntoIterator,
        I::Item: AsRef<ResourceManager>,
        F: IntoIterator<Item = Locator>,
    {
        let name = name.to_string();
        members
            .into_iter()
            .filter_map(move |member| member.as_ref().get(&name))
            .chain(fallback.into_iter().flatten())
    }

    /// Every locator of every member, in member order.
    pub fn all_across_siblings<I>(members: I) -> impl Iterator<Item = Locator>
    where
        I: IntoIterator,
        I::Item: AsRef<ResourceManager>,
    {
        members
            .into_iter()
            .flat_map(|member| member.as_ref().resources())
    }
}

impl AsRef<ResourceManager> for ResourceManager {
    fn as_ref(&self) -> &ResourceManager {
        self
    }
}
