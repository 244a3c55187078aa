//! Normalization of configured resource locations.

use kinload_api::{FallbackResolver, LoaderError, LoaderResult, Locator};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CLASSPATH_PREFIX: &str = "classpath:";
pub const FILE_URL_PREFIX: &str = "file:";

/// Turn configured location strings into filesystem paths.
///
/// - `classpath:name` is looked up through the fallback resolver
/// - `file:` URLs are converted to paths
/// - anything else is a path, resolved against `base_path` when relative
///
/// Separators are canonicalized to `/`, one trailing `/` is dropped, empty
/// entries are skipped and later duplicates of an earlier location (after
/// canonicalization) are removed.
pub fn check_resource_locations(
    locations: &[String],
    base_path: Option<&Path>,
    fallback: &dyn FallbackResolver,
) -> LoaderResult<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut checked = Vec::with_capacity(locations.len());

    for location in locations {
        let location = location.trim();
        if location.is_empty() {
            continue;
        }

        let path = normalize_separators(&resolve_location(location, base_path, fallback)?);
        let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if seen.insert(key) {
            checked.push(path);
        } else {
            debug!("Skipping duplicate resource location {}", location);
        }
    }

    Ok(checked)
}

fn resolve_location(
    location: &str,
    base_path: Option<&Path>,
    fallback: &dyn FallbackResolver,
) -> LoaderResult<PathBuf> {
    if let Some(name) = location.strip_prefix(CLASSPATH_PREFIX) {
        return match fallback.resource(name) {
            Some(Locator::File { path }) => Ok(path),
            _ => Err(LoaderError::InvalidLocation(format!(
                "class path resource [{}] cannot be resolved because it does not exist",
                location
            ))),
        };
    }

    if location.starts_with(FILE_URL_PREFIX) {
        return url::Url::parse(location)
            .ok()
            .and_then(|url| url.to_file_path().ok())
            .ok_or_else(|| {
                LoaderError::InvalidLocation(format!(
                    "resource location [{}] is neither a URL nor a well-formed file path",
                    location
                ))
            });
    }

    let path = match base_path {
        Some(base) => base.join(location),
        None => PathBuf::from(location),
    };
    Ok(path)
}

fn normalize_separators(path: &Path) -> PathBuf {
    let text = path.to_string_lossy().replace('\\', "/");
    match text.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => PathBuf::from(trimmed),
        _ => PathBuf::from(text),
    }
}
