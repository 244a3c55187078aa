//! Conversions between qualified unit names and resource names.

use std::borrow::Cow;
use std::path::Path;

pub const CLASS_FILE_SUFFIX: &str = ".class";
pub const PACKAGE_SEPARATOR: char = '.';
pub const RESOURCE_SEPARATOR: char = '/';

/// File extensions recognised as archive packages.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["jar", "zip"];

/// Canonicalize a resource name: platform separators become `/` and one
/// trailing separator is dropped.
pub fn normalize_resource_name(name: &str) -> Cow<'_, str> {
    if name.contains('\\') {
        let mut owned = name.replace('\\', "/");
        if owned.ends_with(RESOURCE_SEPARATOR) {
            owned.pop();
        }
        Cow::Owned(owned)
    } else {
        Cow::Borrowed(name.strip_suffix(RESOURCE_SEPARATOR).unwrap_or(name))
    }
}

/// `a.b.C` -> `a/b/C.class`
pub fn class_name_to_resource_name(class_name: &str) -> String {
    let mut name = class_name.replace(PACKAGE_SEPARATOR, "/");
    name.push_str(CLASS_FILE_SUFFIX);
    name
}

/// `a/b/C.class` -> `a.b.C`; `None` when the name is not a compiled unit.
pub fn resource_name_to_class_name(resource_name: &str) -> Option<String> {
    let stem = resource_name.strip_suffix(CLASS_FILE_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.replace(RESOURCE_SEPARATOR, "."))
}

/// `a.b.` -> `a/b`
pub fn package_name_to_resource_name(package_name: &str) -> String {
    let name = package_name.replace(PACKAGE_SEPARATOR, "/");
    match name.strip_suffix(RESOURCE_SEPARATOR) {
        Some(trimmed) => trimmed.to_string(),
        None => name,
    }
}

pub fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ARCHIVE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_resource_name() {
        assert_eq!(normalize_resource_name("a/b/C.class"), "a/b/C.class");
        assert_eq!(normalize_resource_name("a\\b\\C.class"), "a/b/C.class");
        assert_eq!(normalize_resource_name("META-INF/"), "META-INF");
        assert_eq!(normalize_resource_name("conf\\"), "conf");
        // only one trailing separator is stripped
        assert_eq!(normalize_resource_name("x//"), "x/");
        assert!(matches!(normalize_resource_name("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_class_and_resource_names() {
        assert_eq!(class_name_to_resource_name("a.b.C"), "a/b/C.class");
        assert_eq!(
            resource_name_to_class_name("x/Y.class"),
            Some("x.Y".to_string())
        );
        assert_eq!(resource_name_to_class_name("x/y.xml"), None);
        assert_eq!(resource_name_to_class_name(".class"), None);
        assert_eq!(package_name_to_resource_name("com.acme."), "com/acme");
        assert_eq!(package_name_to_resource_name("com.acme"), "com/acme");
    }

    #[test]
    fn test_is_archive() {
        assert!(is_archive(Path::new("/app/lib/ext.jar")));
        assert!(is_archive(Path::new("pkg/plugin.ZIP")));
        assert!(!is_archive(Path::new("pkg/plugin.xml")));
        assert!(!is_archive(Path::new("jar")));
    }
}
