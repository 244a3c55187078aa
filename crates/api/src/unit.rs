//! Materialization seam between the loader tree and the embedding host.

use crate::error::BoxError;
use std::fmt::Debug;
use std::sync::Arc;

/// A loadable artifact produced by the host from raw bytes.
pub trait CompiledUnit: Debug + Send + Sync {
    /// Qualified name the unit was defined under
    fn name(&self) -> &str;
}

pub type UnitRef = Arc<dyn CompiledUnit>;

/// Host capability that turns bytes into a live unit.
///
/// The loader never interprets the bytes itself; it only decides which bytes
/// to hand over. Called at most once per qualified name per loader node.
pub trait Materializer: Send + Sync {
    fn define(&self, name: &str, bytes: &[u8]) -> Result<UnitRef, BoxError>;
}

/// Materializer that keeps the raw bytes as the unit.
///
/// Useful for hosts that only need the located bytecode (inspection tools,
/// tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct RawBytesMaterializer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl CompiledUnit for RawUnit {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Materializer for RawBytesMaterializer {
    fn define(&self, name: &str, bytes: &[u8]) -> Result<UnitRef, BoxError> {
        Ok(Arc::new(RawUnit {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        }))
    }
}
