//! The three kinds of error named in §7: per-order input errors never reach
//! this module (they stay inside a [`crate::game::report::PhaseResolutionReport`]);
//! structural errors and invariant violations are [`CoreError`].

use std::path::PathBuf;

use thiserror::Error;

/// Fatal, non-recoverable errors for the current operation (§7 kind 2):
/// missing save files, invalid turn codes, a missing prior Movement report
/// when entering a Retreat phase, invalid variant data, or attempting to
/// start a game in an already-occupied directory.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StructuralError {
    #[error("no save file at {0}")]
    MissingSaveFile(PathBuf),

    #[error("invalid turn code `{0}`")]
    InvalidTurnCode(String),

    #[error("phase {turn_code} requires the prior Movement report, which is missing")]
    MissingPendingReport { turn_code: String },

    #[error("invalid variant data in {file}: {reason}")]
    InvalidVariantData { file: PathBuf, reason: String },

    #[error("a game already exists at {0}")]
    GameExists(PathBuf),

    #[error("malformed JSON in {file}: {source}")]
    MalformedJson {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error reading or writing {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The top-level error type returned from orchestrator entry points.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// A post-resolution invariant was violated (§7 kind 3). These are
    /// bugs: implementations fail loudly rather than attempt recovery.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl From<crate::judge::error::ResolveError> for CoreError {
    fn from(err: crate::judge::error::ResolveError) -> Self {
        CoreError::Invariant(err.to_string())
    }
}
