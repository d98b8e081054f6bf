//! Asset loaders for the zone map and dialogue graph.
//!
//! Both loaders have a strict variant returning [`CoreResult`] and an
//! `_or_fallback` variant that logs the failure and substitutes a minimal
//! built-in dataset so the game stays playable.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::dialogue::DialogueGraph;
use crate::error::{CoreError, CoreResult};
use crate::geometry::Rect;
use crate::zone::{PoiTypeTable, PointOfInterest, ZoneKind, ZoneMap};

/// Top level of a Tiled JSON map export.
#[derive(Debug, Deserialize)]
struct TiledMap {
    #[serde(default)]
    layers: Vec<TiledLayer>,
}

#[derive(Debug, Deserialize)]
struct TiledLayer {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    objects: Vec<TiledObject>,
}

#[derive(Debug, Deserialize)]
struct TiledObject {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", alias = "class", default)]
    type_id: TypeField,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
}

/// Object type as exported: Tiled writes strings, hand-made maps use integers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypeField {
    Number(i64),
    Text(String),
}

impl Default for TypeField {
    fn default() -> Self {
        TypeField::Number(0)
    }
}

impl TypeField {
    fn resolve(&self) -> Option<i64> {
        match self {
            TypeField::Number(n) => Some(*n),
            TypeField::Text(s) if s.trim().is_empty() => Some(0),
            TypeField::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn read(path: &Path) -> CoreResult<String> {
    fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a zone map from Tiled JSON text.
pub fn parse_zone_map(json: &str, types: &PoiTypeTable) -> Result<ZoneMap, serde_json::Error> {
    let tiled: TiledMap = serde_json::from_str(json)?;
    let mut map = ZoneMap::new();

    for layer in tiled.layers.iter().filter(|l| l.kind == "objectgroup") {
        for obj in &layer.objects {
            let rect = Rect::new(obj.x, obj.y, obj.width, obj.height);
            let Some(type_id) = obj.type_id.resolve() else {
                warn!(name = %obj.name, "map object has a non-numeric type, treating as POI");
                let poi = PointOfInterest::new(obj.name.clone(), -1, rect);
                if let Err(e) = map.add_poi(poi) {
                    warn!("skipping map object: {e}");
                }
                continue;
            };

            match ZoneKind::from_type_id(type_id) {
                ZoneKind::Corridor => map.add_corridor(rect),
                ZoneKind::Access => map.add_access(rect),
                ZoneKind::PointOfInterest => {
                    let name = types.resolve(type_id, &obj.name).to_string();
                    if let Err(e) = map.add_poi(PointOfInterest::new(name, type_id, rect)) {
                        warn!("skipping map object: {e}");
                    }
                }
            }
        }
    }

    Ok(map)
}

/// Load a zone map from a Tiled JSON file.
pub fn load_zone_map(path: &Path, types: &PoiTypeTable) -> CoreResult<ZoneMap> {
    let json = read(path)?;
    let map = parse_zone_map(&json, types).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        pois = map.points_of_interest().len(),
        corridors = map.corridors().len(),
        access = map.access().len(),
        "loaded map from {}",
        path.display()
    );
    Ok(map)
}

/// Load a zone map, falling back to the single goal POI on failure.
pub fn load_zone_map_or_fallback(path: &Path, types: &PoiTypeTable, goal: &str) -> ZoneMap {
    match load_zone_map(path, types) {
        Ok(map) => map,
        Err(e) => {
            warn!("failed to load map, using fallback: {e}");
            ZoneMap::fallback(goal)
        }
    }
}

/// Build a dialogue graph from JSON text, inserting the goal introduction if absent.
pub fn parse_dialogue(json: &str, goal: &str) -> Result<DialogueGraph, serde_json::Error> {
    let mut graph: DialogueGraph = serde_json::from_str(json)?;
    if !graph.is_empty() {
        graph.ensure_intro(goal);
    }
    Ok(graph)
}

/// Load a dialogue graph from a JSON file.
pub fn load_dialogue(path: &Path, goal: &str) -> CoreResult<DialogueGraph> {
    let json = read(path)?;
    let graph = parse_dialogue(&json, goal).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if graph.is_empty() {
        return Err(CoreError::EmptyDialogue);
    }
    for issue in graph.validate() {
        warn!("dialogue: {issue}");
    }
    info!(locations = graph.len(), "loaded dialogue from {}", path.display());
    Ok(graph)
}

/// Load a dialogue graph, falling back to the built-in two-choice graph on failure.
pub fn load_dialogue_or_fallback(path: &Path, goal: &str) -> DialogueGraph {
    match load_dialogue(path, goal) {
        Ok(graph) => graph,
        Err(e) => {
            warn!("failed to load dialogue, using fallback: {e}");
            DialogueGraph::fallback(goal)
        }
    }
}
