//! C3 (validation) and C4 (the fixed-point resolver), §4.3-§4.4.

pub mod adjustment;
mod conflict;
mod convoy;
pub mod error;
mod outcome;
pub mod resolver;
pub mod retreat;
pub mod soa;
mod strength;
mod support;
pub mod validate;

pub use resolver::resolve_movement;
pub use soa::ResolutionSoA;
pub use validate::validate;
