//! The loader tree: nodes, sibling-first lookup and reload.
//!
//! Only a firstborn may create siblings, so the tree is a spine of
//! firstborns with every other node hanging off it:
//!
//! ```text
//! root(1000)
//!  ├── 2001 firstborn
//!  │    ├── 3001 firstborn
//!  │    │    └── 4001 firstborn
//!  │    └── 3002
//!  └── 2002
//! ```
//!
//! Nodes live in an arena owned by the tree and refer to each other by
//! [`NodeHandle`]; [`ModuleLoader`] is the public handle to one node.

mod builder;
mod exclusion;
mod handle;
mod members;
mod node;
mod reload;
mod resolve;
mod tree;

pub use builder::ModuleLoaderBuilder;
pub use exclusion::Exclusions;
pub use handle::ModuleLoader;
pub use members::Members;
pub use node::{NodeHandle, ROOT_ID};
