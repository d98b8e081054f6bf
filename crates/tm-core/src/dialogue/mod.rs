//! Quest dialogue: nodes keyed by (location, node-key), with guarded choices
//! that carry action tokens.

mod action;
mod condition;
mod graph;
mod node;

pub use action::Action;
pub use condition::Condition;
pub use graph::{DialogueGraph, GraphIssue, INITIAL_NODE, INTRO_NODE, NodeRef};
pub use node::{Choice, DialogueNode};
