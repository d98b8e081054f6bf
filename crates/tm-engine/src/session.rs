//! An open dialogue encounter.

use tm_core::dialogue::{INITIAL_NODE, INTRO_NODE};
use tm_core::{DialogueGraph, DialogueNode, NodeRef, WorldState};
use tracing::{info, warn};

use crate::selection::SelectionStateMachine;

/// The state of one open encounter: which node is active, which of its
/// choices are visible, and where the selection stands.
///
/// The visible list is a cache of indices into the active node's choices,
/// recomputed whenever the world or the node changes. The selection is
/// always clamped into it.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterSession {
    active_node: NodeRef,
    visible: Vec<usize>,
    selection: SelectionStateMachine,
    hovered: Option<usize>,
}

impl EncounterSession {
    /// Open the encounter for `location`.
    ///
    /// Returns `None` when the location has no `"initial"` node. The first
    /// encounter with `goal` opens its introduction node instead, once.
    pub fn start(
        location: &str,
        graph: &DialogueGraph,
        world: &mut WorldState,
        goal: &str,
    ) -> Option<Self> {
        if graph.get(location, INITIAL_NODE).is_none() {
            warn!(location, "no dialogue for location");
            return None;
        }

        let mut key = INITIAL_NODE;
        if location == goal && world.first_interaction {
            world.first_interaction = false;
            if graph.get(location, INTRO_NODE).is_some() {
                key = INTRO_NODE;
            }
        }

        let mut session = Self {
            active_node: NodeRef::new(location, key),
            visible: Vec::new(),
            selection: SelectionStateMachine::new(),
            hovered: None,
        };
        session.refresh(graph, world);
        info!(node = %session.active_node, "encounter started");
        Some(session)
    }

    /// The active node's address.
    pub fn active_node(&self) -> &NodeRef {
        &self.active_node
    }

    /// Resolve the active node against the graph.
    pub fn node<'g>(&self, graph: &'g DialogueGraph) -> Option<&'g DialogueNode> {
        graph.node(&self.active_node)
    }

    /// Indices into the active node's choices that are currently visible.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Number of visible choices.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// The node choice index behind a visible index.
    pub fn choice_index(&self, visible_index: usize) -> Option<usize> {
        self.visible.get(visible_index).copied()
    }

    /// Selection state.
    pub fn selection(&self) -> &SelectionStateMachine {
        &self.selection
    }

    /// Mutable selection state.
    pub fn selection_mut(&mut self) -> &mut SelectionStateMachine {
        &mut self.selection
    }

    /// Visible index under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Set the visible index under the pointer.
    pub fn set_hovered(&mut self, hovered: Option<usize>) {
        self.hovered = hovered.filter(|&i| i < self.visible.len());
    }

    /// Re-evaluate guards against the world and clamp the selection.
    pub fn refresh(&mut self, graph: &DialogueGraph, world: &WorldState) {
        self.visible = self
            .node(graph)
            .map(|node| node.visible_indices(world))
            .unwrap_or_default();
        self.selection.clamp(self.visible.len());
        self.hovered = self.hovered.filter(|&i| i < self.visible.len());
    }

    /// Continue the conversation at `target`.
    ///
    /// Returns false and leaves the session untouched if the node does not exist.
    pub fn switch_to(&mut self, target: NodeRef, graph: &DialogueGraph, world: &WorldState) -> bool {
        if graph.node(&target).is_none() {
            warn!(from = %self.active_node, %target, "switch target not found");
            return false;
        }
        self.active_node = target;
        self.selection.reset();
        self.hovered = None;
        self.refresh(graph, world);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_core::{Choice, Condition};

    fn graph() -> DialogueGraph {
        let mut graph = DialogueGraph::new();
        graph.insert(
            NodeRef::initial("Nest"),
            DialogueNode::new("Hi")
                .with_choice(Choice::new("Always"))
                .with_choice(
                    Choice::new("Keyholder").with_condition(Condition::HasItem("key".into())),
                )
                .with_choice(Choice::new("Bye")),
        );
        graph.insert(NodeRef::new("Nest", "deeper"), DialogueNode::new("More"));
        graph.ensure_intro("Polytron4000");
        graph.insert(NodeRef::initial("Polytron4000"), DialogueNode::new("Hum"));
        graph
    }

    #[test]
    fn start_without_initial_node_fails() {
        let mut world = WorldState::new();
        assert!(EncounterSession::start("Orgia", &graph(), &mut world, "Polytron4000").is_none());
    }

    #[test]
    fn start_filters_guarded_choices() {
        let mut world = WorldState::new();
        let session = EncounterSession::start("Nest", &graph(), &mut world, "Polytron4000").unwrap();
        assert_eq!(session.visible(), &[0, 2]);
        assert_eq!(session.choice_index(1), Some(2));
        assert!(world.first_interaction);
    }

    #[test]
    fn goal_intro_shown_once() {
        let graph = graph();
        let mut world = WorldState::new();
        let first = EncounterSession::start("Polytron4000", &graph, &mut world, "Polytron4000").unwrap();
        assert_eq!(first.active_node().key, INTRO_NODE);
        assert!(!world.first_interaction);

        let second =
            EncounterSession::start("Polytron4000", &graph, &mut world, "Polytron4000").unwrap();
        assert_eq!(second.active_node().key, INITIAL_NODE);
    }

    #[test]
    fn refresh_clamps_selection() {
        let graph = graph();
        let mut world = WorldState::new();
        world.give_item("key");
        let mut session = EncounterSession::start("Nest", &graph, &mut world, "Polytron4000").unwrap();
        assert_eq!(session.visible_len(), 3);
        session.selection_mut().click(2, 3);
        session.set_hovered(Some(2));

        world.remove_item("key");
        session.refresh(&graph, &world);
        assert_eq!(session.visible_len(), 2);
        assert_eq!(session.selection().selected_index(), 1);
        assert_eq!(session.hovered(), None);
    }

    #[test]
    fn switch_to_missing_node_keeps_state() {
        let graph = graph();
        let mut world = WorldState::new();
        let mut session = EncounterSession::start("Nest", &graph, &mut world, "Polytron4000").unwrap();
        assert!(!session.switch_to(NodeRef::new("Nest", "nowhere"), &graph, &world));
        assert_eq!(session.active_node(), &NodeRef::initial("Nest"));

        assert!(session.switch_to(NodeRef::new("Nest", "deeper"), &graph, &world));
        assert_eq!(session.active_node().key, "deeper");
        assert_eq!(session.visible_len(), 0);
    }
}
