//! The mutable progression store.

use std::collections::BTreeSet;

use serde::Serialize;

/// Speed multiplier a fresh game starts with.
pub const BASE_SPEED_MULTIPLIER: f32 = 1.0;

/// Everything a playthrough accumulates: items, quest flags, boosts, and
/// the bookkeeping that gates encounter re-triggering.
///
/// Created once at game start, mutated only by the action interpreter and
/// the encounter gate, and reset wholesale on restart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldState {
    /// Item tokens the player carries.
    pub inventory: BTreeSet<String>,
    /// Quest flags set so far.
    pub quest_flags: BTreeSet<String>,
    /// Product of all speed boosts applied (never below the base).
    pub speed_multiplier: f32,
    /// Whether the alternate visual theme is active.
    pub theme_active: bool,
    /// Whether the game has been won.
    pub win: bool,
    /// The last point of interest that triggered an encounter.
    pub last_poi: Option<String>,
    /// Whether a corridor was touched since `last_poi` triggered.
    pub traveled_corridor_since_last_poi: bool,
    /// True until the goal location has been met once.
    pub first_interaction: bool,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldState {
    /// Create the initial state of a playthrough.
    pub fn new() -> Self {
        Self {
            inventory: BTreeSet::new(),
            quest_flags: BTreeSet::new(),
            speed_multiplier: BASE_SPEED_MULTIPLIER,
            theme_active: false,
            win: false,
            last_poi: None,
            traveled_corridor_since_last_poi: false,
            first_interaction: true,
        }
    }

    /// Reset to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Check if the player carries an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    /// Add an item. Returns false if it was already carried.
    pub fn give_item(&mut self, item: impl Into<String>) -> bool {
        self.inventory.insert(item.into())
    }

    /// Remove an item. Returns false if it was not carried.
    pub fn remove_item(&mut self, item: &str) -> bool {
        self.inventory.remove(item)
    }

    /// Check if a quest flag is set.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.quest_flags.contains(flag)
    }

    /// Set a quest flag. Returns false if it was already set.
    pub fn set_flag(&mut self, flag: impl Into<String>) -> bool {
        self.quest_flags.insert(flag.into())
    }

    /// Compose a speed boost multiplicatively. Returns the new multiplier.
    ///
    /// The result is floored at the base multiplier.
    pub fn boost_speed(&mut self, multiplier: f32) -> f32 {
        self.speed_multiplier = (self.speed_multiplier * multiplier).max(BASE_SPEED_MULTIPLIER);
        self.speed_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let state = WorldState::new();
        assert!(state.inventory.is_empty());
        assert!(state.quest_flags.is_empty());
        assert!((state.speed_multiplier - 1.0).abs() < f32::EPSILON);
        assert!(!state.theme_active);
        assert!(!state.win);
        assert!(state.last_poi.is_none());
        assert!(!state.traveled_corridor_since_last_poi);
        assert!(state.first_interaction);
    }

    #[test]
    fn inventory_management() {
        let mut state = WorldState::new();
        assert!(!state.has_item("key"));
        assert!(state.give_item("key"));
        assert!(state.has_item("key"));

        // Adding again should not duplicate
        assert!(!state.give_item("key"));
        assert_eq!(state.inventory.len(), 1);

        assert!(state.remove_item("key"));
        assert!(!state.has_item("key"));
        assert!(!state.remove_item("key"));
    }

    #[test]
    fn quest_flags() {
        let mut state = WorldState::new();
        assert!(!state.has_flag("met_dragon"));
        assert!(state.set_flag("met_dragon"));
        assert!(state.has_flag("met_dragon"));
        assert!(!state.set_flag("met_dragon"));
    }

    #[test]
    fn speed_boosts_compose_multiplicatively() {
        let mut state = WorldState::new();
        state.boost_speed(2.0);
        let m = state.boost_speed(1.5);
        assert!((m - 3.0).abs() < 1e-6);
    }

    #[test]
    fn speed_never_drops_below_base() {
        let mut state = WorldState::new();
        assert!((state.boost_speed(0.5) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut state = WorldState::new();
        state.give_item("key");
        state.set_flag("f");
        state.boost_speed(2.0);
        state.theme_active = true;
        state.win = true;
        state.last_poi = Some("Nest".to_string());
        state.traveled_corridor_since_last_poi = true;
        state.first_interaction = false;

        state.reset();
        assert_eq!(state, WorldState::new());
    }
}
