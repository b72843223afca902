//! Error types for the syntax layer. Grounded on the teacher's
//! non-exhaustive `ErrorKind` (`parser/error.rs`).

use thiserror::Error;

/// A single parse failure: what shape was expected, and the input that
/// didn't match it. Rendered into the single human-readable error string
/// §4.2 requires on an invalid `SyntaxResult`.
#[derive(Debug, Clone, Error)]
#[error("expected {expected}, found `{input}`")]
pub struct SyntaxError {
    pub expected: &'static str,
    pub input: String,
}

impl SyntaxError {
    pub fn new(expected: &'static str, input: impl Into<String>) -> Self {
        SyntaxError {
            expected,
            input: input.into(),
        }
    }
}

/// Turn codes are parsed independently of order syntax (§6); a malformed
/// code is a structural error, not a per-order one.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum TurnCodeError {
    #[error("turn code `{0}` does not match the YYYY-S-P shape")]
    MalformedShape(String),
}
