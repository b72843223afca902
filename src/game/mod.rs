//! C1 (state/persistence) and C5 (the phase orchestrator), §3-§4.5.

pub mod error;
pub mod io;
pub mod orchestrator;
pub mod report;
pub mod state;
pub mod turn;
pub mod variant;

pub use error::{CoreError, StructuralError};
pub use io::GamesRoot;
pub use orchestrator::process_turn;
pub use report::{OutcomeType, PhaseResolutionReport, ResolutionResult, SemanticResult};
pub use state::{GameMeta, GameState, GameStatus};
