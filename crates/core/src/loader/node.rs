use super::exclusion::Exclusions;
use crate::resource::LocalResourceManager;
use dashmap::DashMap;
use kinload_api::UnitRef;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Id of every root node.
pub const ROOT_ID: u32 = 1000;

/// Stable arena index of a loader node. Never reused within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct LoaderNode {
    pub(crate) handle: NodeHandle,
    /// Diagnostic only.
    pub(crate) id: u32,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) root: NodeHandle,
    pub(crate) firstborn: bool,
    pub(crate) resource_manager: LocalResourceManager,
    /// Children created by this node, in creation order.
    pub(crate) siblings: Mutex<Vec<NodeHandle>>,
    pub(crate) exclusions: RwLock<Exclusions>,
    pub(crate) reload_count: AtomicU32,
    pub(crate) detached: AtomicBool,
    pub(crate) defined: DashMap<String, UnitRef>,
    unit_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl LoaderNode {
    pub(crate) fn new(
        handle: NodeHandle,
        id: u32,
        parent: Option<NodeHandle>,
        root: NodeHandle,
        firstborn: bool,
        resource_manager: LocalResourceManager,
    ) -> Self {
        Self {
            handle,
            id,
            parent,
            root,
            firstborn,
            resource_manager,
            siblings: Mutex::new(Vec::new()),
            exclusions: RwLock::new(Exclusions::default()),
            reload_count: AtomicU32::new(0),
            detached: AtomicBool::new(false),
            defined: DashMap::new(),
            unit_locks: DashMap::new(),
        }
    }

    /// `(parent_id / 1000 + 1) * 1000 + index`, index counted from 1.
    pub(crate) fn child_id(parent_id: u32, index: usize) -> u32 {
        (parent_id / 1000 + 1) * 1000 + index as u32
    }

    /// Run `f` while holding the lock that serializes resolution of `name`
    /// on this node. The lock entry is dropped again once no other caller
    /// waits on it, so the table only holds names being resolved right now.
    pub(crate) fn with_unit_lock<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        let lock = self.unit_lock(name);
        let result = {
            let _guard = lock.lock();
            f()
        };
        // One reference in the table, one here.
        self.unit_locks
            .remove_if(name, |_, held| Arc::ptr_eq(held, &lock) && Arc::strong_count(held) == 2);
        result
    }

    fn unit_lock(&self, name: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.unit_locks.get(name) {
            return Arc::clone(&lock);
        }
        Arc::clone(&self.unit_locks.entry(name.to_string()).or_default())
    }

    pub(crate) fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }

    pub(crate) fn release(&self) {
        self.detached.store(true, Ordering::Release);
        self.resource_manager.release();
        self.defined.clear();
    }
}
