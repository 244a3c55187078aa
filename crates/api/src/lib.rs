//! Contracts shared between the kinload loader tree and the hosts embedding it.

pub mod error;
pub mod fallback;
pub mod locator;
pub mod sibling;
pub mod unit;

pub use error::{BoxError, LoaderError, LoaderResult};
pub use fallback::{FallbackResolver, NoFallback};
pub use locator::Locator;
pub use sibling::SiblingJoiner;
pub use unit::{CompiledUnit, Materializer, RawBytesMaterializer, RawUnit, UnitRef};
