use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or loading Tarmac content.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An asset file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An asset file is not valid JSON for the expected shape.
    #[error("malformed {path}: {source}")]
    Json {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// A condition token does not belong to the guard vocabulary.
    #[error("unknown condition: \"{0}\"")]
    UnknownCondition(String),

    /// An action token does not belong to the action vocabulary.
    #[error("unknown action: \"{0}\"")]
    UnknownAction(String),

    /// An action token was recognized but its argument is unusable.
    #[error("invalid argument in \"{token}\": {reason}")]
    InvalidArgument {
        /// The offending token.
        token: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Two points of interest resolved to the same name.
    #[error("point of interest already exists: \"{0}\"")]
    DuplicatePoi(String),

    /// The dialogue source contained no locations.
    #[error("dialogue graph is empty")]
    EmptyDialogue,
}
