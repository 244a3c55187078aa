use super::ModuleLoader;
use super::node::{LoaderNode, NodeHandle};
use super::tree::LoaderTree;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Search order over a loader tree.
///
/// Yields the root, then every sibling the root created, then every sibling
/// created by the first of those, then every sibling created by the first of
/// *those*, and so on down the firstborn spine. Given
///
/// ```text
/// N0 ─┬─ N1 ─┬─ N4
///     │      └─ N5
///     ├─ N2
///     └─ N3
/// ```
///
/// the order is `N0, N1, N2, N3, N4, N5`. Only the firstborn creates
/// siblings, so this visits every node of the tree.
///
/// Each generation's sibling list is read when the iterator reaches it;
/// nodes removed by a concurrent reload after that point are skipped.
pub struct Members {
    tree: Arc<LoaderTree>,
    next: Option<Arc<LoaderNode>>,
    generation: std::vec::IntoIter<NodeHandle>,
    first_child: Option<Arc<LoaderNode>>,
}

impl Members {
    pub(crate) fn new(tree: Arc<LoaderTree>, root: Arc<LoaderNode>) -> Self {
        let generation = root.siblings.lock().clone().into_iter();
        Self {
            tree,
            next: Some(root),
            generation,
            first_child: None,
        }
    }

    fn advance(&mut self) -> Option<Arc<LoaderNode>> {
        self.generation.by_ref().find_map(|handle| self.tree.get(handle))
    }
}

impl Iterator for Members {
    type Item = ModuleLoader;

    fn next(&mut self) -> Option<ModuleLoader> {
        let current = self.next.take()?;

        if let Some(node) = self.advance() {
            if self.first_child.is_none() {
                self.first_child = Some(Arc::clone(&node));
            }
            self.next = Some(node);
        } else if let Some(first) = self.first_child.take() {
            self.generation = first.siblings.lock().clone().into_iter();
            if let Some(node) = self.advance() {
                self.first_child = Some(Arc::clone(&node));
                self.next = Some(node);
            }
        }

        Some(ModuleLoader {
            tree: Arc::clone(&self.tree),
            node: current,
        })
    }
}

impl FusedIterator for Members {}
