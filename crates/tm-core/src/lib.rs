//! Core types for Tarmac: zone geometry, the dialogue graph, and world state.
//!
//! This crate holds the read-only content of a festival map (corridors,
//! access zones, points of interest, quest dialogue) and the mutable
//! progression store that dialogue actions write to. It knows nothing about
//! input or timing; the engine crate drives it.

/// Dialogue graph: nodes, choices, guard conditions, and action tokens.
pub mod dialogue;
/// Error types used throughout the crate.
pub mod error;
/// Axis-aligned rectangles in world coordinates.
pub mod geometry;
/// Asset loaders for map geometry and dialogue content, with fallbacks.
pub mod loader;
/// Mutable progression store: inventory, flags, speed, theme, victory.
pub mod state;
/// Static zone geometry: corridors, access zones, and points of interest.
pub mod zone;

/// Re-export dialogue types.
pub use dialogue::{Action, Choice, Condition, DialogueGraph, DialogueNode, NodeRef};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export geometry types.
pub use geometry::Rect;
/// Re-export world state.
pub use state::WorldState;
/// Re-export zone types.
pub use zone::{PoiTypeTable, PointOfInterest, ZoneKind, ZoneMap};
