use crate::LoaderArgs;
use crate::view::LocatorView;
use kinload_core::naming::package_name_to_resource_name;
use tabled::Table;

/// Resource name looked up for `name`; a package is looked up as its
/// directory.
fn lookup_name(name: &str, package: bool) -> String {
    if package {
        package_name_to_resource_name(name)
    } else {
        name.to_string()
    }
}

pub fn run(
    args: &LoaderArgs,
    name: &str,
    all: bool,
    package: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = args.builder()?.build()?;
    let resource = lookup_name(name, package);

    let matches: Vec<LocatorView> = if all {
        root.resolve_resources(&resource)
            .into_iter()
            .map(LocatorView::from)
            .collect()
    } else {
        root.resolve_resource(&resource)
            .into_iter()
            .map(LocatorView::from)
            .collect()
    };

    if matches.is_empty() {
        println!("'{}' not found.", name);
    } else {
        println!("{}", Table::new(matches));
    }
    Ok(())
}
