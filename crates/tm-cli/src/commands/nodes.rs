use comfy_table::{ContentArrangement, Table};

use crate::AssetArgs;

pub fn run(assets: &AssetArgs, location: Option<&str>) -> Result<(), String> {
    let config = super::load_config(assets)?;
    let (_, graph) = super::load_strict(assets, &config)?;

    let nodes: Vec<_> = graph
        .nodes()
        .filter(|(at, _)| location.is_none_or(|l| at.location.eq_ignore_ascii_case(l)))
        .collect();

    if nodes.is_empty() {
        println!("  No nodes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Location", "Node", "Choices", "Text"]);

    for (at, node) in &nodes {
        let choices = node
            .choices
            .iter()
            .map(|c| match &c.condition {
                Some(condition) => format!("{} [{condition}]", c.text),
                None => c.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            at.location.clone(),
            at.key.clone(),
            choices,
            super::truncate(&node.text, 60),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} nodes", nodes.len());

    Ok(())
}
