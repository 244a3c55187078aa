use crate::LoaderArgs;
use crate::view::LocatorView;
use kinload_core::ModuleLoader;
use kinload_core::naming::resource_name_to_class_name;
use std::collections::HashSet;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct UnitNameRow {
    #[tabled(rename = "Qualified Name")]
    name: String,
    #[tabled(rename = "Loader")]
    loader: u32,
}

pub fn run(
    args: &LoaderArgs,
    files_only: bool,
    units: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = args.builder()?.build()?;

    if units {
        let rows = compiled_units(&root);
        if rows.is_empty() {
            println!("No compiled units found.");
        } else {
            let total = rows.len();
            println!("{}", Table::new(rows));
            println!("{} compiled units", total);
        }
        return Ok(());
    }

    let locators = if files_only {
        root.file_resources()
    } else {
        root.all_resources().collect()
    };

    if locators.is_empty() {
        println!("No resources found.");
        return Ok(());
    }

    let total = locators.len();
    let rows: Vec<LocatorView> = locators.into_iter().map(LocatorView::from).collect();
    println!("{}", Table::new(rows));
    println!("{} resources", total);
    Ok(())
}

/// Every compiled unit the tree would define locally, paired with the first
/// node in search order that holds it.
fn compiled_units(root: &ModuleLoader) -> Vec<UnitNameRow> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for member in root.members() {
        for resource in member.resource_manager().manager().resource_names() {
            let Some(name) = resource_name_to_class_name(&resource) else {
                continue;
            };
            if seen.insert(name.clone()) {
                rows.push(UnitNameRow {
                    name,
                    loader: member.id(),
                });
            }
        }
    }
    rows
}
