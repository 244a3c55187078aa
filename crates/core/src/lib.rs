//! Hierarchical module loader with sibling-first lookup.
//!
//! A [`ModuleLoader`] tree owns one resource cache per directory or archive
//! location. Compiled units and resources are looked up across the whole
//! tree before the host's [`FallbackResolver`](kinload_api::FallbackResolver)
//! is asked.

pub mod config;
pub mod loader;
pub mod logging;
pub mod naming;
pub mod resource;

pub use config::LoaderConfig;
pub use loader::{Members, ModuleLoader, ModuleLoaderBuilder, NodeHandle};
pub use resource::{LocalResourceManager, ResourceManager, WorkArea};
