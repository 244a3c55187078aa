//! The enclosing host loader consulted after the local tree.

use crate::locator::Locator;
use crate::unit::UnitRef;

/// Explicitly passed replacement for an ambient, process-wide loader.
pub trait FallbackResolver: Send + Sync {
    fn resolve_unit(&self, qualified_name: &str) -> Option<UnitRef>;

    fn resource(&self, name: &str) -> Option<Locator>;

    fn resources(&self, name: &str) -> Vec<Locator> {
        self.resource(name).into_iter().collect()
    }
}

/// Fallback that knows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFallback;

impl FallbackResolver for NoFallback {
    fn resolve_unit(&self, _qualified_name: &str) -> Option<UnitRef> {
        None
    }

    fn resource(&self, _name: &str) -> Option<Locator> {
        None
    }
}
