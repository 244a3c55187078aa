use crate::naming::PACKAGE_SEPARATOR;
use std::collections::HashSet;

/// Names a loader node refuses to resolve locally.
///
/// Packages match by prefix (`com.acme` covers `com.acme.Foo` and
/// `com.acme.sub.Bar`, not `com.acmex.Foo`), classes match exactly.
#[derive(Debug, Default, Clone)]
pub struct Exclusions {
    packages: Option<HashSet<String>>,
    classes: Option<HashSet<String>>,
}

impl Exclusions {
    /// Replace the excluded packages; an empty list clears them.
    pub fn set_packages<S: AsRef<str>>(&mut self, names: &[S]) {
        self.packages = if names.is_empty() {
            None
        } else {
            let mut packages = HashSet::with_capacity(names.len());
            for name in names {
                let name: &str = name.as_ref();
                packages.insert(format!("{}{}", name, PACKAGE_SEPARATOR));
            }
            Some(packages)
        };
    }

    /// Replace the excluded classes; an empty list clears them. Classes
    /// already covered by an excluded package are not recorded.
    pub fn set_classes<S: AsRef<str>>(&mut self, names: &[S]) {
        let mut classes = HashSet::new();
        for name in names {
            let name: &str = name.as_ref();
            if !self.is_excluded_package(name) {
                classes.insert(name.to_string());
            }
        }
        self.classes = (!classes.is_empty()).then_some(classes);
    }

    pub fn is_excluded(&self, class_name: &str) -> bool {
        self.is_excluded_package(class_name) || self.is_excluded_class(class_name)
    }

    pub fn is_excluded_package(&self, class_name: &str) -> bool {
        self.packages
            .as_ref()
            .is_some_and(|packages| packages.iter().any(|p| class_name.starts_with(p.as_str())))
    }

    pub fn is_excluded_class(&self, class_name: &str) -> bool {
        self.classes
            .as_ref()
            .is_some_and(|classes| classes.contains(class_name))
    }

    pub fn excluded_classes(&self) -> usize {
        self.classes.as_ref().map_or(0, HashSet::len)
    }
}
