//! The dialogue graph and node addressing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::node::{Choice, DialogueNode};

/// Entry key for a location's first node.
pub const INITIAL_NODE: &str = "initial";
/// Key of the goal location's one-shot introduction node.
pub const INTRO_NODE: &str = "intro";

/// Address of a node: (location, node-key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeRef {
    /// Location name.
    pub location: String,
    /// Node key within the location.
    pub key: String,
}

impl NodeRef {
    /// Create a node reference.
    pub fn new(location: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            key: key.into(),
        }
    }

    /// The entry node of a location.
    pub fn initial(location: impl Into<String>) -> Self {
        Self::new(location, INITIAL_NODE)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.location, self.key)
    }
}

/// A structural problem found by [`DialogueGraph::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    /// A location has no `"initial"` node, so encounters there never start.
    MissingInitial(String),
    /// A choice switches to a node that does not exist.
    DanglingSwitch {
        /// The node holding the choice.
        from: NodeRef,
        /// The unresolved target.
        target: NodeRef,
    },
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphIssue::MissingInitial(location) => {
                write!(f, "location \"{location}\" has no \"{INITIAL_NODE}\" node")
            }
            GraphIssue::DanglingSwitch { from, target } => {
                write!(f, "{from} switches to missing node {target}")
            }
        }
    }
}

/// Quest content: location → node-key → node. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DialogueGraph {
    locations: BTreeMap<String, BTreeMap<String, DialogueNode>>,
}

impl DialogueGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in single-location graph used when the dialogue source fails to load.
    pub fn fallback(goal: &str) -> Self {
        let mut graph = Self::new();
        graph.insert(
            NodeRef::initial(goal),
            DialogueNode::new("The mighty Polytron 4000 awaits activation!")
                .with_choice(Choice::new("Activate").with_action(Action::WinGame))
                .with_choice(Choice::new("Not ready").with_action(Action::Close)),
        );
        graph.ensure_intro(goal);
        graph
    }

    /// The built-in introduction node shown on the first goal encounter.
    pub fn default_intro(goal: &str) -> DialogueNode {
        DialogueNode::new(format!(
            "Welcome to Tarmac Festival! {goal} hums quietly, waiting for someone \
             to bring it to life. Explore the grounds, talk to everyone, and come back \
             when you are ready."
        ))
        .with_choice(Choice::new("Tell me more").with_action(Action::SwitchNode {
            location: None,
            node: INITIAL_NODE.to_string(),
        }))
        .with_choice(Choice::new("Let's go").with_action(Action::Close))
    }

    /// Insert or replace a node.
    pub fn insert(&mut self, at: NodeRef, node: DialogueNode) {
        self.locations
            .entry(at.location)
            .or_default()
            .insert(at.key, node);
    }

    /// Make sure the goal location has an introduction node.
    ///
    /// Returns true if the built-in one had to be inserted.
    pub fn ensure_intro(&mut self, goal: &str) -> bool {
        if self.get(goal, INTRO_NODE).is_some() {
            return false;
        }
        self.insert(NodeRef::new(goal, INTRO_NODE), Self::default_intro(goal));
        true
    }

    /// Look up a node by location and key.
    pub fn get(&self, location: &str, key: &str) -> Option<&DialogueNode> {
        self.locations.get(location).and_then(|nodes| nodes.get(key))
    }

    /// Look up a node by reference.
    pub fn node(&self, at: &NodeRef) -> Option<&DialogueNode> {
        self.get(&at.location, &at.key)
    }

    /// True if the location has any dialogue.
    pub fn has_location(&self, location: &str) -> bool {
        self.locations.contains_key(location)
    }

    /// Location names in sorted order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// Every node with its address, sorted by location then key.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeRef, &DialogueNode)> {
        self.locations.iter().flat_map(|(location, nodes)| {
            nodes
                .iter()
                .map(move |(key, node)| (NodeRef::new(location.as_str(), key.as_str()), node))
        })
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True if the graph has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Resolve the target of a node switch issued from `from`.
    pub fn switch_target(from: &NodeRef, location: Option<&str>, node: &str) -> NodeRef {
        NodeRef::new(location.unwrap_or(&from.location), node)
    }

    /// Report structural problems that would make encounters silently fail.
    pub fn validate(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();
        for (location, nodes) in &self.locations {
            if !nodes.contains_key(INITIAL_NODE) {
                issues.push(GraphIssue::MissingInitial(location.clone()));
            }
        }
        for (from, node) in self.nodes() {
            for choice in &node.choices {
                let Some(action) = &choice.action else {
                    continue;
                };
                for step in action.steps() {
                    if let Action::SwitchNode { location, node } = step {
                        let target = Self::switch_target(&from, location.as_deref(), node);
                        if self.node(&target).is_none() {
                            issues.push(GraphIssue::DanglingSwitch {
                                from: from.clone(),
                                target,
                            });
                        }
                    }
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "Brausecus": {
                "initial": {
                    "text": "Thirsty?",
                    "choices": [
                        {"text": "Yes", "action": "goto_menu"},
                        {"text": "No", "action": "close"}
                    ]
                },
                "menu": {
                    "text": "Pick one.",
                    "choices": [
                        {"text": "Mate", "action": "speed_boost_1.5"},
                        {"text": "Elsewhere", "action": "goto_Nest:initial"}
                    ]
                }
            }
        }"#
    }

    #[test]
    fn deserialize_nested_mapping() {
        let graph: DialogueGraph = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(graph.has_location("Brausecus"));
        let node = graph.get("Brausecus", "menu").unwrap();
        assert_eq!(node.choices[0].action, Some(Action::ApplySpeedBoost(1.5)));
        assert!(graph.node(&NodeRef::initial("Brausecus")).is_some());
        assert!(graph.get("Brausecus", "missing").is_none());
        assert!(graph.get("Nowhere", INITIAL_NODE).is_none());
    }

    #[test]
    fn validate_reports_dangling_switch() {
        let graph: DialogueGraph = serde_json::from_str(sample_json()).unwrap();
        let issues = graph.validate();
        assert_eq!(
            issues,
            vec![GraphIssue::DanglingSwitch {
                from: NodeRef::new("Brausecus", "menu"),
                target: NodeRef::initial("Nest"),
            }]
        );
    }

    #[test]
    fn validate_reports_missing_initial() {
        let mut graph = DialogueGraph::new();
        graph.insert(NodeRef::new("Nest", "later"), DialogueNode::new("zzz"));
        assert_eq!(
            graph.validate(),
            vec![GraphIssue::MissingInitial("Nest".to_string())]
        );
    }

    #[test]
    fn fallback_graph_shape() {
        let graph = DialogueGraph::fallback("Polytron4000");
        let node = graph.get("Polytron4000", INITIAL_NODE).unwrap();
        assert_eq!(node.choices.len(), 2);
        assert_eq!(node.choices[0].text, "Activate");
        assert_eq!(node.choices[0].action, Some(Action::WinGame));
        assert_eq!(node.choices[1].action, Some(Action::Close));
        assert!(graph.get("Polytron4000", INTRO_NODE).is_some());
        assert!(graph.validate().is_empty());
    }

    #[test]
    fn ensure_intro_keeps_authored_node() {
        let mut graph = DialogueGraph::new();
        graph.insert(NodeRef::new("Goal", INTRO_NODE), DialogueNode::new("Custom"));
        assert!(!graph.ensure_intro("Goal"));
        assert_eq!(graph.get("Goal", INTRO_NODE).unwrap().text, "Custom");

        assert!(graph.ensure_intro("Other"));
        assert!(graph.get("Other", INTRO_NODE).is_some());
    }

    #[test]
    fn node_ref_display() {
        assert_eq!(NodeRef::new("Nest", "initial").to_string(), "Nest:initial");
    }

    #[test]
    fn nodes_iterates_sorted() {
        let graph: DialogueGraph = serde_json::from_str(sample_json()).unwrap();
        let keys: Vec<String> = graph.nodes().map(|(at, _)| at.key).collect();
        assert_eq!(keys, ["initial", "menu"]);
    }
}
