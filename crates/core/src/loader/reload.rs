use super::ModuleLoader;
use kinload_api::LoaderResult;
use std::sync::atomic::Ordering;
use tracing::{debug, info, warn};

impl ModuleLoader {
    /// Reload the whole tree, starting at the root whichever node it is
    /// called on.
    ///
    /// Walking down the firstborn spine, every node bumps its reload count,
    /// rescans its location and then drops every sibling it created except
    /// its firstborn. Nested archives found by a rescan are attached again as
    /// new nodes. Configured locations survive because they form the
    /// firstborn chain; anything else created after the first pass does not.
    ///
    /// A node whose rescan fails keeps whatever its reset left, the pass
    /// carries on, and the first such failure is returned at the end.
    pub fn reload(&self) -> LoaderResult<()> {
        let _guard = self.tree.reload_lock.lock();
        let mut first_error = None;
        let mut current = Some(self.root());

        while let Some(loader) = current {
            let count = loader.node.reload_count.fetch_add(1, Ordering::AcqRel) + 1;
            debug!("Reloading loader {}", loader);

            if let Err(e) = loader.node.resource_manager.reset(&loader) {
                warn!("Failed to rescan loader {}: {}", loader.id(), e);
                first_error.get_or_insert(e);
            }

            let (firstborn, departing): (Vec<_>, Vec<_>) = loader
                .siblings()
                .into_iter()
                .partition(ModuleLoader::is_firstborn);

            if !departing.is_empty() {
                debug!(
                    "Dropping {} siblings of loader {} (reload {})",
                    departing.len(),
                    loader.id(),
                    count
                );
                loader.leave(&departing);
            }

            current = firstborn.into_iter().next();
        }

        info!("Reloaded loader tree ({} nodes)", self.tree_size());
        first_error.map_or(Ok(()), Err)
    }
}
