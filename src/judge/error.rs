//! §7 kind 3: invariant violations detected post-resolution. These are
//! implementation bugs rather than recoverable conditions — callers
//! propagate them loudly instead of attempting to recover.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("fixed-point resolution did not converge within {passes} passes")]
    NotConverged { passes: usize },

    #[error("slot {slot} (unit {unit_id}) resolved to `{region}`, neither its origin nor its ordered destination")]
    BadDestination {
        slot: usize,
        unit_id: String,
        region: String,
    },
}
