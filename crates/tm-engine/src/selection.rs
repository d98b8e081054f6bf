//! Two-phase choice selection: select with one tap, confirm with a second tap
//! on the same half.

use serde::Serialize;
use tracing::debug;

use crate::input::Gesture;

/// Where the selection is in its select-then-confirm cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPhase {
    /// Waiting for a tap to pick a choice.
    #[default]
    Selecting,
    /// A choice is highlighted; the same tap again confirms it.
    Confirming,
}

/// Turns taps and pointer clicks into confirmed choice indices.
///
/// Indices address the *visible* choices of the active node. The machine
/// does not know about guards; the session tells it how many choices are
/// visible and clamps it when that number shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStateMachine {
    phase: SelectionPhase,
    selected_index: usize,
}

impl SelectionStateMachine {
    /// Start in `Selecting` with the first choice highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Currently highlighted visible-choice index.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Feed an accepted tap. Returns the confirmed index, if any.
    ///
    /// A tap on the half that is already pending confirms it; any other tap
    /// re-selects. With no visible choices nothing happens.
    pub fn on_gesture(&mut self, gesture: Gesture, visible_len: usize) -> Option<usize> {
        if visible_len == 0 {
            return None;
        }
        let target = gesture.target_index(visible_len);
        if self.phase == SelectionPhase::Confirming && self.selected_index == target {
            debug!(index = target, "choice confirmed by gesture");
            self.phase = SelectionPhase::Selecting;
            return Some(target);
        }
        debug!(index = target, ?gesture, "choice selected");
        self.selected_index = target;
        self.phase = SelectionPhase::Confirming;
        None
    }

    /// Confirm a choice directly, bypassing the select step.
    pub fn click(&mut self, index: usize, visible_len: usize) -> Option<usize> {
        if index >= visible_len {
            return None;
        }
        self.selected_index = index;
        self.phase = SelectionPhase::Selecting;
        Some(index)
    }

    /// Drop a pending confirmation, keeping the highlight.
    pub fn release(&mut self) {
        if self.phase == SelectionPhase::Confirming {
            debug!("selection released after pause");
            self.phase = SelectionPhase::Selecting;
        }
    }

    /// Keep the highlight inside a visible list of `visible_len` choices.
    pub fn clamp(&mut self, visible_len: usize) {
        let max = visible_len.saturating_sub(1);
        if self.selected_index > max {
            self.selected_index = max;
        }
    }

    /// Back to `Selecting` on the first choice.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
