//! Interaction and progression engine for Tarmac.
//!
//! Turns noisy two-axis analog input into player movement and debounced
//! dialogue selection, decides when points of interest open their
//! encounters, and applies confirmed choices to the world. Everything runs
//! in a single-threaded tick driven by [`Game::tick`]; presentation layers
//! push [`InputEvent`]s and draw the returned [`Snapshot`].

/// Tunables for a game run.
pub mod config;
/// Encounter gating on corridor travel.
pub mod encounter;
/// Error types for the engine.
pub mod error;
/// The tick orchestrator.
pub mod game;
/// Analog input mapping, gesture debouncing, and the event queue.
pub mod input;
/// Applying confirmed choices to the world.
pub mod interpreter;
/// Player token movement.
pub mod kinematics;
/// Dialogue box geometry for pointer hit-testing.
pub mod layout;
/// Player-facing notices.
pub mod notice;
/// The open dialogue encounter.
pub mod session;
/// Two-phase choice selection.
pub mod selection;
/// Read-only per-tick view for presentation.
pub mod snapshot;

/// Re-exports of [`config::GameConfig`], [`config::InputConfig`], and [`config::PlayerConfig`].
pub use config::{GameConfig, InputConfig, PlayerConfig};
/// Re-export of [`encounter::EncounterGate`].
pub use encounter::EncounterGate;
/// Re-exports of [`error::EngineError`] and [`error::EngineResult`].
pub use error::{EngineError, EngineResult};
/// Re-export of [`game::Game`].
pub use game::Game;
/// Re-exports of the input types.
pub use input::{
    AXIS_MAX, Axis, AxisInputMapper, AxisSample, Gesture, GestureZone, InputEvent, InputQueue,
    SelectionGesture,
};
/// Re-exports of [`interpreter::ActionContext`], [`interpreter::ActionInterpreter`], and [`interpreter::Outcome`].
pub use interpreter::{ActionContext, ActionInterpreter, Outcome};
/// Re-export of [`kinematics::PlayerKinematics`].
pub use kinematics::PlayerKinematics;
/// Re-export of [`layout::DialogueLayout`].
pub use layout::DialogueLayout;
/// Re-export of [`notice::Notice`].
pub use notice::Notice;
/// Re-exports of [`selection::SelectionPhase`] and [`selection::SelectionStateMachine`].
pub use selection::{SelectionPhase, SelectionStateMachine};
/// Re-export of [`session::EncounterSession`].
pub use session::EncounterSession;
/// Re-exports of the snapshot types.
pub use snapshot::{ChoiceView, DialogueView, Snapshot};
