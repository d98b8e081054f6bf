//! Error types for the engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while setting up or driving a game.
///
/// Nothing raised during a tick is fatal; these cover setup and the
/// embedding application's misuse of the API.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A configuration file could not be read or parsed.
    #[error("invalid config {path}: {reason}")]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Content failed to load.
    #[error(transparent)]
    Core(#[from] tm_core::CoreError),

    /// A choice index does not address a visible choice.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// No encounter is open.
    #[error("no encounter is open")]
    NoEncounter,
}
