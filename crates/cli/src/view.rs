use kinload_api::Locator;
use kinload_core::ModuleLoader;
use serde::Serialize;
use tabled::Tabled;

/// One loader node, as printed by `kinload tree`.
#[derive(Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    #[tabled(rename = "Id")]
    pub id: u32,
    #[tabled(rename = "Parent")]
    pub parent: String,
    #[tabled(rename = "Firstborn")]
    pub firstborn: bool,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Resources")]
    pub resources: usize,
    #[tabled(rename = "Siblings")]
    pub siblings: usize,
    #[tabled(rename = "Reloads")]
    pub reloads: u32,
}

impl NodeView {
    pub fn from_loader(loader: &ModuleLoader) -> Self {
        Self {
            id: loader.id(),
            parent: loader
                .parent()
                .map(|p| p.id().to_string())
                .unwrap_or_else(|| "-".to_string()),
            firstborn: loader.is_firstborn(),
            location: indent(loader, &location_label(loader)),
            resources: loader.number_of_resources(),
            siblings: loader.siblings().len(),
            reloads: loader.reload_count(),
        }
    }
}

#[derive(Tabled)]
pub struct LocatorView {
    #[tabled(rename = "Kind")]
    pub kind: &'static str,
    #[tabled(rename = "Locator")]
    pub locator: String,
}

impl From<Locator> for LocatorView {
    fn from(locator: Locator) -> Self {
        Self {
            kind: if locator.is_archive_entry() {
                "archive"
            } else {
                "file"
            },
            locator: locator.to_string(),
        }
    }
}

fn location_label(loader: &ModuleLoader) -> String {
    match loader.resource_location() {
        Some(path) => path.display().to_string(),
        None if loader.is_root() => "(root)".to_string(),
        None => "-".to_string(),
    }
}

/// Two spaces per ancestor.
fn indent(loader: &ModuleLoader, label: &str) -> String {
    let depth = std::iter::successors(loader.parent(), |p| p.parent()).count();
    format!("{}{}", "  ".repeat(depth), label)
}
