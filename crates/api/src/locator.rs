//! Opaque references to where a resource's bytes live.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const FILE_URL_PREFIX: &str = "file:";
pub const JAR_URL_PREFIX: &str = "jar:";
pub const JAR_URL_SEPARATOR: &str = "!/";

/// Where a resource lives: a plain filesystem entry, or a named entry inside
/// an archive package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Locator {
    /// File or directory on disk
    File { path: PathBuf },
    /// Entry inside an archive (the archive is the scratch copy, not the original)
    Archive { archive: PathBuf, entry: String },
}

impl Locator {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Locator::File { path: path.into() }
    }

    pub fn archive_entry(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        Locator::Archive {
            archive: archive.into(),
            entry: entry.into(),
        }
    }

    pub fn is_archive_entry(&self) -> bool {
        matches!(self, Locator::Archive { .. })
    }

    /// The file on disk backing this locator.
    pub fn backing_path(&self) -> &Path {
        match self {
            Locator::File { path } => path,
            Locator::Archive { archive, .. } => archive,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::File { path } => write!(f, "{}{}", FILE_URL_PREFIX, path.display()),
            Locator::Archive { archive, entry } => write!(
                f,
                "{}{}{}{}{}",
                JAR_URL_PREFIX,
                FILE_URL_PREFIX,
                archive.display(),
                JAR_URL_SEPARATOR,
                entry
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        let file = Locator::file("/app/classes/a/b/C.class");
        assert_eq!(file.to_string(), "file:/app/classes/a/b/C.class");

        let entry = Locator::archive_entry("/tmp/kinload-x/ext.jar", "x/Y.class");
        assert_eq!(entry.to_string(), "jar:file:/tmp/kinload-x/ext.jar!/x/Y.class");
        assert!(entry.is_archive_entry());
        assert_eq!(entry.backing_path(), Path::new("/tmp/kinload-x/ext.jar"));
    }

    #[test]
    fn test_serde_tagging() {
        let entry = Locator::archive_entry("/tmp/a.zip", "conf/app.xml");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "archive");
        assert_eq!(json["entry"], "conf/app.xml");
    }
}
