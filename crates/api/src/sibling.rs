use crate::error::LoaderResult;
use std::path::Path;

/// Implemented by a loader node so its discovery engine can hand nested
/// archives back to the tree without owning the tree.
pub trait SiblingJoiner {
    /// Attach `location` as a new sibling of the caller (a child of the
    /// caller's parent).
    fn join_sibling(&self, location: &Path) -> LoaderResult<()>;
}
