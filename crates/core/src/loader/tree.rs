//! Arena holding every node of one loader tree.

use super::node::{LoaderNode, NodeHandle};
use crate::resource::WorkArea;
use kinload_api::{FallbackResolver, Materializer};
use parking_lot::{Mutex, RwLock};
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state behind every [`ModuleLoader`](super::ModuleLoader) handle of
/// one tree. Nodes refer to each other by [`NodeHandle`]; removed nodes
/// leave an empty slot so stale handles resolve to nothing.
pub(crate) struct LoaderTree {
    arena: RwLock<Vec<Option<Arc<LoaderNode>>>>,
    pub(crate) fallback: Arc<dyn FallbackResolver>,
    pub(crate) materializer: Arc<dyn Materializer>,
    pub(crate) work_area: Arc<WorkArea>,
    pub(crate) base_path: Option<PathBuf>,
    pub(crate) reload_lock: Mutex<()>,
}

impl LoaderTree {
    pub(crate) fn new(
        fallback: Arc<dyn FallbackResolver>,
        materializer: Arc<dyn Materializer>,
        work_area: Arc<WorkArea>,
        base_path: Option<PathBuf>,
    ) -> Self {
        Self {
            arena: RwLock::new(Vec::new()),
            fallback,
            materializer,
            work_area,
            base_path,
            reload_lock: Mutex::new(()),
        }
    }

    pub(crate) fn get(&self, handle: NodeHandle) -> Option<Arc<LoaderNode>> {
        self.arena.read().get(handle.0).and_then(Clone::clone)
    }

    pub(crate) fn insert_with(
        &self,
        build: impl FnOnce(NodeHandle) -> LoaderNode,
    ) -> Arc<LoaderNode> {
        let mut arena = self.arena.write();
        let node = Arc::new(build(NodeHandle(arena.len())));
        arena.push(Some(Arc::clone(&node)));
        node
    }

    pub(crate) fn vacate(&self, handle: NodeHandle) -> Option<Arc<LoaderNode>> {
        self.arena.write().get_mut(handle.0).and_then(Option::take)
    }

    /// Number of live nodes.
    pub(crate) fn live_nodes(&self) -> usize {
        self.arena.read().iter().filter(|slot| slot.is_some()).count()
    }
}
