//! Dialogue nodes and choice structures.

use serde::Deserialize;

use super::action::Action;
use super::condition::Condition;
use crate::state::WorldState;

/// A single node of a conversation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DialogueNode {
    /// The text to display.
    pub text: String,
    /// Choices in display order.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl DialogueNode {
    /// Create a node with no choices.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Choices whose guard passes, in node order.
    pub fn visible_choices(&self, world: &WorldState) -> Vec<&Choice> {
        self.choices.iter().filter(|c| c.is_visible(world)).collect()
    }

    /// Node-level indices of the visible choices, in node order.
    pub fn visible_indices(&self, world: &WorldState) -> Vec<usize> {
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_visible(world))
            .map(|(i, _)| i)
            .collect()
    }
}

/// A single choice in a dialogue node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Choice {
    /// The text shown to the player.
    pub text: String,
    /// Guard that must pass for the choice to be shown and applied.
    #[serde(default)]
    pub condition: Option<Condition>,
    /// Effect applied on confirmation.
    #[serde(default)]
    pub action: Option<Action>,
}

impl Choice {
    /// Create an unguarded choice with no action.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            condition: None,
            action: None,
        }
    }

    /// Set the guard.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set the action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// True if the choice has no guard or its guard passes.
    pub fn is_visible(&self, world: &WorldState) -> bool {
        self.condition.as_ref().is_none_or(|c| c.evaluate(world))
    }
}
