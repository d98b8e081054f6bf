//! Read-only view of a game at the end of a tick.

use serde::Serialize;
use tm_core::{NodeRef, Rect};

use crate::selection::SelectionPhase;

/// Everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Tick time in seconds.
    pub time: f64,
    /// Center of the player token.
    pub position: (f32, f32),
    /// The token's bounding square.
    pub player: Rect,
    /// Pending click-to-move target.
    pub move_target: Option<(f32, f32)>,
    /// Whether the player overlaps a corridor.
    pub on_corridor: bool,
    /// Whether the player overlaps an access zone.
    pub in_access: bool,
    /// The point of interest under the player.
    pub current_poi: Option<String>,
    /// The open encounter.
    pub dialogue: Option<DialogueView>,
    /// Carried items, sorted.
    pub inventory: Vec<String>,
    /// Quest flags set so far, sorted.
    pub quest_flags: Vec<String>,
    /// Multiplier on the base speed.
    pub speed_multiplier: f32,
    /// Whether the alternate theme is active.
    pub theme_active: bool,
    /// Whether the game has been won.
    pub win: bool,
}

/// The open encounter as the player sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogueView {
    /// The active node.
    pub node: NodeRef,
    /// The node text.
    pub text: String,
    /// Visible choices in display order.
    pub choices: Vec<ChoiceView>,
    /// Highlighted visible index.
    pub selected_index: usize,
    /// Select-then-confirm phase.
    pub phase: SelectionPhase,
    /// Visible index under the pointer.
    pub hovered: Option<usize>,
}

/// One visible choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceView {
    /// Choice text.
    pub text: String,
    /// Clickable row.
    pub region: Rect,
}
