//! Resource layer: per-node caches and the discovery engine that fills them.
//!
//! ```text
//! LocalResourceManager ──scan──▶ ResourceManager ──▶ ResourceEntries
//!        │                                             (name → Locator)
//!        ├── directory: walk, register, collect nested archives
//!        └── archive:   copy into WorkArea, register every entry
//! ```

pub mod entries;
pub mod local;
pub mod location;
pub mod manager;
pub mod reader;
pub mod work_area;

pub use entries::ResourceEntries;
pub use local::LocalResourceManager;
pub use location::check_resource_locations;
pub use manager::ResourceManager;
pub use reader::read_locator;
pub use work_area::{WORK_DIR_PREFIX, WorkArea};
