use crate::LoaderArgs;
use kinload_api::{BoxError, CompiledUnit, Materializer, UnitRef};
use kinload_core::naming::class_name_to_resource_name;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::warn;
use xxhash_rust::xxh3::xxh3_64;

/// Unit that only remembers the size and hash of its bytes.
#[derive(Debug)]
pub struct Fingerprint {
    name: String,
    size: usize,
    hash: u64,
}

impl CompiledUnit for Fingerprint {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Fingerprints every unit it is asked to define and keeps them by name.
#[derive(Default)]
pub struct FingerprintMaterializer {
    defined: Mutex<HashMap<String, Arc<Fingerprint>>>,
}

impl FingerprintMaterializer {
    pub fn get(&self, name: &str) -> Option<Arc<Fingerprint>> {
        self.defined
            .lock()
            .get(name)
            .cloned()
    }
}

impl Materializer for FingerprintMaterializer {
    fn define(&self, name: &str, bytes: &[u8]) -> Result<UnitRef, BoxError> {
        let print = Arc::new(Fingerprint {
            name: name.to_string(),
            size: bytes.len(),
            hash: xxh3_64(bytes),
        });
        self.defined
            .lock()
            .insert(name.to_string(), print.clone());
        Ok(print)
    }
}

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "XXH3")]
    hash: String,
    #[tabled(rename = "Defined From")]
    source: String,
}

pub fn run(args: &LoaderArgs, names: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let fingerprints = Arc::new(FingerprintMaterializer::default());
    let root = args
        .builder()?
        .with_materializer(fingerprints.clone())
        .build()?;

    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        if let Err(e) = root.resolve_compiled_unit(name) {
            warn!("{}", e);
            println!("{}: {}", name, e);
            continue;
        }

        // Units handed over by the fallback were never fingerprinted here.
        let row = match fingerprints.get(name) {
            Some(print) => UnitRow {
                name: name.clone(),
                size: format!("{} B", print.size),
                hash: format!("{:016x}", print.hash),
                source: root
                    .find_resource(&class_name_to_resource_name(name))
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            },
            None => UnitRow {
                name: name.clone(),
                size: "-".to_string(),
                hash: "-".to_string(),
                source: "(fallback)".to_string(),
            },
        };
        rows.push(row);
    }

    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }
    Ok(())
}
