//! Tree structure operations on a [`ModuleLoader`] handle.

use super::members::Members;
use super::node::{LoaderNode, NodeHandle, ROOT_ID};
use super::tree::LoaderTree;
use crate::resource::{LocalResourceManager, ResourceManager, check_resource_locations};
use kinload_api::{LoaderError, LoaderResult, SiblingJoiner};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::trace;

/// Handle to one node of a loader tree.
///
/// Cloning is cheap; clones refer to the same node. Two handles are equal
/// when they refer to the same node.
#[derive(Clone)]
pub struct ModuleLoader {
    pub(crate) tree: Arc<LoaderTree>,
    pub(crate) node: Arc<LoaderNode>,
}

impl ModuleLoader {
    pub fn builder() -> super::ModuleLoaderBuilder {
        super::ModuleLoaderBuilder::new()
    }

    pub(crate) fn new_root(tree: Arc<LoaderTree>) -> Self {
        let manager = LocalResourceManager::new(None, Arc::clone(&tree.work_area));
        let node =
            tree.insert_with(|handle| LoaderNode::new(handle, ROOT_ID, None, handle, true, manager));
        let root = Self { tree, node };
        trace!("Root loader {}", root);
        root
    }

    fn attach(&self, node: Arc<LoaderNode>) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
            node,
        }
    }

    pub fn id(&self) -> u32 {
        self.node.id
    }

    pub fn handle(&self) -> NodeHandle {
        self.node.handle
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    pub fn is_firstborn(&self) -> bool {
        self.node.firstborn
    }

    /// True once the node has been removed from its tree by a reload or by
    /// [`set_resource_locations`](Self::set_resource_locations).
    pub fn is_detached(&self) -> bool {
        self.node.is_detached()
    }

    pub fn resource_location(&self) -> Option<&Path> {
        self.node.resource_manager.location()
    }

    pub fn resource_manager(&self) -> &LocalResourceManager {
        &self.node.resource_manager
    }

    pub fn number_of_resources(&self) -> usize {
        self.node.resource_manager.number_of_resources()
    }

    pub fn reload_count(&self) -> u32 {
        self.node.reload_count.load(Ordering::Acquire)
    }

    pub fn root(&self) -> ModuleLoader {
        match self.tree.get(self.node.root) {
            Some(node) => self.attach(node),
            None => self.clone(),
        }
    }

    pub fn parent(&self) -> Option<ModuleLoader> {
        self.node
            .parent
            .and_then(|handle| self.tree.get(handle))
            .map(|node| self.attach(node))
    }

    /// Siblings created by this node, in creation order.
    pub fn siblings(&self) -> Vec<ModuleLoader> {
        let handles = self.node.siblings.lock().clone();
        handles
            .into_iter()
            .filter_map(|handle| self.tree.get(handle))
            .map(|node| self.attach(node))
            .collect()
    }

    pub fn has_siblings(&self) -> bool {
        !self.node.siblings.lock().is_empty()
    }

    /// Every node of the tree in search order, starting at the root.
    pub fn members(&self) -> Members {
        let root = self.root();
        Members::new(Arc::clone(&self.tree), root.node)
    }

    /// Number of nodes currently attached to the tree.
    pub fn tree_size(&self) -> usize {
        self.tree.live_nodes()
    }

    /// Create a node for `location` under this node and scan it.
    ///
    /// Only a firstborn (or the root) may create siblings. The first node
    /// created under this one becomes its firstborn. If the scan fails the
    /// new node is removed again and the error returned.
    pub fn create_sibling(&self, location: impl AsRef<Path>) -> LoaderResult<ModuleLoader> {
        if !self.node.firstborn {
            return Err(LoaderError::NotFirstborn { id: self.node.id });
        }

        let manager =
            LocalResourceManager::new(Some(location.as_ref()), Arc::clone(&self.tree.work_area));
        let child = {
            let mut siblings = self.node.siblings.lock();
            let index = siblings.len() + 1;
            let node = self.tree.insert_with(|handle| {
                LoaderNode::new(
                    handle,
                    LoaderNode::child_id(self.node.id, index),
                    Some(self.node.handle),
                    self.node.root,
                    index == 1,
                    manager,
                )
            });
            siblings.push(node.handle);
            self.attach(node)
        };

        if let Err(e) = child.node.resource_manager.scan(&child) {
            self.leave(std::slice::from_ref(&child));
            return Err(e);
        }

        trace!("New sibling loader {}", child);
        Ok(child)
    }

    /// Build the firstborn chain: each location becomes the firstborn of the
    /// node created for the previous one.
    pub(crate) fn create_chain(&self, locations: &[PathBuf]) -> LoaderResult<()> {
        let mut current = self.clone();
        for location in locations {
            current = current.create_sibling(location)?;
        }
        Ok(())
    }

    /// Discard every sibling of this node and rebuild the firstborn chain
    /// from `locations`. Excludes a concurrent [`reload`](Self::reload).
    pub fn set_resource_locations<S: AsRef<str>>(&self, locations: &[S]) -> LoaderResult<()> {
        let _guard = self.tree.reload_lock.lock();
        let locations: Vec<String> = locations.iter().map(|s| s.as_ref().to_string()).collect();
        let checked = check_resource_locations(
            &locations,
            self.tree.base_path.as_deref(),
            self.tree.fallback.as_ref(),
        )?;

        self.leave(&self.siblings());
        self.create_chain(&checked)
    }

    /// Replace the packages this node will not resolve locally.
    pub fn exclude_packages<S: AsRef<str>>(&self, names: &[S]) {
        self.node.exclusions.write().set_packages(names);
    }

    /// Replace the classes this node will not resolve locally.
    pub fn exclude_classes<S: AsRef<str>>(&self, names: &[S]) {
        self.node.exclusions.write().set_classes(names);
    }

    pub fn is_excluded(&self, qualified_name: &str) -> bool {
        self.node.exclusions.read().is_excluded(qualified_name)
    }

    /// Remove `departing` siblings from this node, releasing them and
    /// everything they created.
    pub(crate) fn leave(&self, departing: &[ModuleLoader]) {
        self.node
            .siblings
            .lock()
            .retain(|handle| !departing.iter().any(|d| d.node.handle == *handle));
        for loader in departing {
            self.discard(loader);
        }
    }

    fn discard(&self, loader: &ModuleLoader) {
        let children: Vec<NodeHandle> = loader.node.siblings.lock().drain(..).collect();
        for handle in children {
            if let Some(node) = self.tree.get(handle) {
                self.discard(&self.attach(node));
            }
        }

        trace!("Removing loader {}", loader);
        self.tree.vacate(loader.node.handle);
        loader.node.release();
    }
}

impl SiblingJoiner for ModuleLoader {
    /// Ask this node's parent to create the sibling, so nested archives sit
    /// next to the node that found them.
    fn join_sibling(&self, location: &Path) -> LoaderResult<()> {
        let parent = self.parent().ok_or(LoaderError::NoParent { id: self.node.id })?;
        parent.create_sibling(location).map(|_| ())
    }
}

impl AsRef<ResourceManager> for ModuleLoader {
    fn as_ref(&self) -> &ResourceManager {
        self.node.resource_manager.manager()
    }
}

impl PartialEq for ModuleLoader {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for ModuleLoader {}

impl fmt::Display for ModuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{id={}", self.node.id)?;
        match self.parent() {
            Some(parent) => write!(f, ", parent={}", parent.id())?,
            None => write!(f, ", parent=none")?,
        }
        write!(f, ", root={}", self.is_root())?;
        write!(f, ", firstborn={}", self.node.firstborn)?;
        if let Some(location) = self.resource_location() {
            write!(f, ", resourceLocation={}", location.display())?;
        }
        write!(
            f,
            ", numberOfResources={}, numberOfSiblings={}, reloadCount={}}}",
            self.number_of_resources(),
            self.node.siblings.lock().len(),
            self.reload_count()
        )
    }
}

impl fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleLoader{}", self)
    }
}
