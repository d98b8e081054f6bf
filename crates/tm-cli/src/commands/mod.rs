pub mod check;
pub mod nodes;
pub mod replay;

use tm_core::loader;
use tm_core::{DialogueGraph, PoiTypeTable, ZoneMap};
use tm_engine::GameConfig;

use crate::AssetArgs;

/// Load the configuration, or the defaults when no file was given.
fn load_config(assets: &AssetArgs) -> Result<GameConfig, String> {
    match &assets.config {
        Some(path) => GameConfig::from_json_file(path).map_err(|e| e.to_string()),
        None => Ok(GameConfig::default()),
    }
}

/// Load map and dialogue, failing on the first broken file.
fn load_strict(assets: &AssetArgs, config: &GameConfig) -> Result<(ZoneMap, DialogueGraph), String> {
    let map = loader::load_zone_map(&assets.map, &PoiTypeTable::default())
        .map_err(|e| e.to_string())?;
    let graph = loader::load_dialogue(&assets.dialogue, &config.goal_location)
        .map_err(|e| e.to_string())?;
    Ok((map, graph))
}

/// Load map and dialogue, substituting the built-in fallbacks for broken files.
fn load_lenient(assets: &AssetArgs, config: &GameConfig) -> (ZoneMap, DialogueGraph) {
    let goal = config.goal_location.as_str();
    let map = loader::load_zone_map_or_fallback(&assets.map, &PoiTypeTable::default(), goal);
    let graph = loader::load_dialogue_or_fallback(&assets.dialogue, goal);
    (map, graph)
}

/// Shorten text for a table cell.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else if text.is_empty() {
        "—".to_string()
    } else {
        text.to_string()
    }
}
