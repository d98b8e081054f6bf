use colored::Colorize;

use crate::AssetArgs;

pub fn run(assets: &AssetArgs) -> Result<(), String> {
    let config = super::load_config(assets)?;
    let (map, graph) = super::load_strict(assets, &config)?;

    println!(
        "  {} {} POIs, {} corridors, {} access zones",
        "Map".bold(),
        map.points_of_interest().len(),
        map.corridors().len(),
        map.access().len()
    );
    println!(
        "  {} {} locations, {} nodes",
        "Dialogue".bold(),
        graph.len(),
        graph.nodes().count()
    );

    let mut warnings = Vec::new();
    for poi in map.points_of_interest() {
        if !graph.has_location(&poi.name) {
            warnings.push(format!("POI '{}' has no dialogue", poi.name));
        }
    }
    if map.poi(&config.goal_location).is_none() {
        warnings.push(format!(
            "goal location '{}' is not on the map",
            config.goal_location
        ));
    }
    warnings.extend(graph.validate().iter().map(ToString::to_string));

    if warnings.is_empty() {
        println!("  {}", "All checks passed.".green());
    } else {
        println!();
        for warning in &warnings {
            println!("  {} {warning}", "warning:".yellow().bold());
        }
        println!();
        println!(
            "  {} warning{}",
            warnings.len(),
            if warnings.len() == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
