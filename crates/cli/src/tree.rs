use crate::LoaderArgs;
use crate::view::NodeView;
use tabled::Table;
use tracing::info;

pub fn run(args: &LoaderArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let root = args.builder()?.build()?;
    info!("Built loader tree with {} nodes", root.tree_size());

    let rows: Vec<NodeView> = root.members().map(|m| NodeView::from_loader(&m)).collect();

    if json {
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}
