//! Static map geometry: walkable corridors, access buffers, and points of interest.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::geometry::Rect;

/// Object type id that marks a walkable corridor.
pub const CORRIDOR_TYPE: i64 = 99;
/// Object type id that marks an access (buffer) zone around a point of interest.
pub const ACCESS_TYPE: i64 = 98;

/// Which collection a map object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    /// Walkable corridor; traversal re-arms encounters.
    Corridor,
    /// Display-only buffer around a point of interest.
    Access,
    /// A named rectangle that can start a dialogue encounter.
    PointOfInterest,
}

impl ZoneKind {
    /// Classify a raw object type id.
    pub fn from_type_id(type_id: i64) -> Self {
        match type_id {
            CORRIDOR_TYPE => ZoneKind::Corridor,
            ACCESS_TYPE => ZoneKind::Access,
            _ => ZoneKind::PointOfInterest,
        }
    }
}

/// A named rectangle that can trigger dialogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    /// Stable name, also the dialogue location key.
    pub name: String,
    /// Raw object type id from the map source.
    pub type_id: i64,
    /// Trigger area.
    pub rect: Rect,
}

impl PointOfInterest {
    /// Create a new point of interest.
    pub fn new(name: impl Into<String>, type_id: i64, rect: Rect) -> Self {
        Self {
            name: name.into(),
            type_id,
            rect,
        }
    }
}

/// Maps numeric object types to point-of-interest names.
#[derive(Debug, Clone)]
pub struct PoiTypeTable {
    names: HashMap<i64, String>,
}

impl Default for PoiTypeTable {
    fn default() -> Self {
        let names = [
            (0, "Polytron4000"),
            (1, "Brausecus"),
            (2, "Resonant"),
            (3, "Vacanza"),
            (4, "Looserlounge"),
            (5, "L300"),
            (6, "Orgia"),
            (7, "Lila Drache"),
            (8, "Nest"),
            (9, "Workshopspace"),
            (10, "2. Reihe"),
        ];
        Self {
            names: names
                .into_iter()
                .map(|(id, name)| (id, name.to_string()))
                .collect(),
        }
    }
}

impl PoiTypeTable {
    /// Create an empty table; every object keeps its raw name.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Register or replace the name for a type id.
    pub fn with_name(mut self, type_id: i64, name: impl Into<String>) -> Self {
        self.names.insert(type_id, name.into());
        self
    }

    /// Resolve a point-of-interest name, falling back to the raw object name.
    pub fn resolve<'a>(&'a self, type_id: i64, raw_name: &'a str) -> &'a str {
        self.names.get(&type_id).map_or(raw_name, String::as_str)
    }
}

/// The zone map. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ZoneMap {
    corridors: Vec<Rect>,
    access: Vec<Rect>,
    points_of_interest: Vec<PointOfInterest>,
}

impl ZoneMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in single-POI map used when the map source fails to load.
    pub fn fallback(goal: &str) -> Self {
        let mut map = Self::new();
        map.points_of_interest.push(PointOfInterest::new(
            goal,
            0,
            Rect::new(45.0, 91.0, 85.0, 70.0),
        ));
        map
    }

    /// Add a walkable corridor.
    pub fn add_corridor(&mut self, rect: Rect) {
        self.corridors.push(rect);
    }

    /// Add an access zone.
    pub fn add_access(&mut self, rect: Rect) {
        self.access.push(rect);
    }

    /// Add a point of interest. Names must be unique within the map.
    pub fn add_poi(&mut self, poi: PointOfInterest) -> CoreResult<()> {
        if self.poi(&poi.name).is_some() {
            return Err(CoreError::DuplicatePoi(poi.name));
        }
        self.points_of_interest.push(poi);
        Ok(())
    }

    /// Walkable corridors in declaration order.
    pub fn corridors(&self) -> &[Rect] {
        &self.corridors
    }

    /// Access zones in declaration order.
    pub fn access(&self) -> &[Rect] {
        &self.access
    }

    /// Points of interest in declaration order.
    pub fn points_of_interest(&self) -> &[PointOfInterest] {
        &self.points_of_interest
    }

    /// Look up a point of interest by name.
    pub fn poi(&self, name: &str) -> Option<&PointOfInterest> {
        self.points_of_interest.iter().find(|p| p.name == name)
    }

    /// True if `rect` overlaps any corridor.
    pub fn is_on_corridor(&self, rect: &Rect) -> bool {
        self.corridors.iter().any(|c| c.overlaps(rect))
    }

    /// True if `rect` overlaps any access zone.
    pub fn is_in_access(&self, rect: &Rect) -> bool {
        self.access.iter().any(|a| a.overlaps(rect))
    }

    /// The first point of interest (in map order) that overlaps `rect`.
    pub fn poi_overlapping(&self, rect: &Rect) -> Option<&PointOfInterest> {
        self.points_of_interest
            .iter()
            .find(|p| p.rect.overlaps(rect))
    }

    /// Total number of rectangles across all three collections.
    pub fn len(&self) -> usize {
        self.corridors.len() + self.access.len() + self.points_of_interest.len()
    }

    /// True if the map holds no rectangles at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
