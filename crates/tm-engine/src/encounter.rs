//! Deciding when a point of interest may (re-)open its dialogue.

use tm_core::{Rect, WorldState, ZoneMap};
use tracing::debug;

/// Gates encounters on "walk away via a corridor and come back".
///
/// A POI that just triggered stays quiet until the player has touched a
/// corridor; standing on its edge never re-fires the dialogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncounterGate;

impl EncounterGate {
    /// Create a gate.
    pub fn new() -> Self {
        Self
    }

    /// Record corridor travel. Must run every tick, dialogue or not.
    ///
    /// Returns whether the player is on a corridor.
    pub fn track_corridor(&self, player: &Rect, map: &ZoneMap, world: &mut WorldState) -> bool {
        let on_corridor = map.is_on_corridor(player);
        if on_corridor {
            world.traveled_corridor_since_last_poi = true;
        }
        on_corridor
    }

    /// The POI whose dialogue should open now, if any.
    ///
    /// Only the first overlapping POI in map order is considered. On trigger
    /// it becomes `last_poi` and corridor travel starts over.
    pub fn maybe_trigger(
        &self,
        player: &Rect,
        map: &ZoneMap,
        world: &mut WorldState,
    ) -> Option<String> {
        let poi = map.poi_overlapping(player)?;
        let repeat = world.last_poi.as_deref() == Some(poi.name.as_str());
        if repeat && !world.traveled_corridor_since_last_poi {
            return None;
        }
        debug!(poi = %poi.name, repeat, "encounter triggered");
        world.last_poi = Some(poi.name.clone());
        world.traveled_corridor_since_last_poi = false;
        Some(poi.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_core::PointOfInterest;

    fn map() -> ZoneMap {
        let mut map = ZoneMap::new();
        map.add_corridor(Rect::new(0.0, 0.0, 300.0, 20.0));
        map.add_poi(PointOfInterest::new("Nest", 8, Rect::new(300.0, 0.0, 50.0, 50.0)))
            .unwrap();
        map.add_poi(PointOfInterest::new("L300", 5, Rect::new(320.0, 0.0, 50.0, 50.0)))
            .unwrap();
        map
    }

    #[test]
    fn first_entry_triggers() {
        let gate = EncounterGate::new();
        let mut world = WorldState::new();
        let player = Rect::centered(310.0, 30.0, 8.0);
        assert_eq!(gate.maybe_trigger(&player, &map(), &mut world).as_deref(), Some("Nest"));
        assert_eq!(world.last_poi.as_deref(), Some("Nest"));
        assert!(!world.traveled_corridor_since_last_poi);
    }

    #[test]
    fn standing_still_does_not_retrigger() {
        let gate = EncounterGate::new();
        let mut world = WorldState::new();
        world.last_poi = Some("Nest".to_string());
        let player = Rect::centered(310.0, 30.0, 8.0);
        assert_eq!(gate.maybe_trigger(&player, &map(), &mut world), None);
    }

    #[test]
    fn corridor_travel_rearms() {
        let gate = EncounterGate::new();
        let map = map();
        let mut world = WorldState::new();
        let poi = Rect::centered(310.0, 30.0, 8.0);
        let corridor = Rect::centered(100.0, 10.0, 8.0);

        assert!(gate.maybe_trigger(&poi, &map, &mut world).is_some());
        assert!(gate.track_corridor(&corridor, &map, &mut world));
        assert!(world.traveled_corridor_since_last_poi);
        assert!(gate.maybe_trigger(&poi, &map, &mut world).is_some());
    }

    #[test]
    fn overlapping_pois_first_wins() {
        let gate = EncounterGate::new();
        let mut world = WorldState::new();
        let player = Rect::centered(335.0, 30.0, 8.0);
        assert_eq!(gate.maybe_trigger(&player, &map(), &mut world).as_deref(), Some("Nest"));
    }

    #[test]
    fn different_poi_triggers_without_corridor() {
        let gate = EncounterGate::new();
        let mut world = WorldState::new();
        world.last_poi = Some("L300".to_string());
        let player = Rect::centered(310.0, 30.0, 8.0);
        assert_eq!(gate.maybe_trigger(&player, &map(), &mut world).as_deref(), Some("Nest"));
    }

    #[test]
    fn off_corridor_leaves_flag() {
        let gate = EncounterGate::new();
        let mut world = WorldState::new();
        let away = Rect::centered(600.0, 600.0, 8.0);
        assert!(!gate.track_corridor(&away, &map(), &mut world));
        assert!(!world.traveled_corridor_since_last_poi);
    }
}
