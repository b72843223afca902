//! The report types produced by one resolved phase (§3, §6). Field sets are
//! confirmed against `original_source`'s `serialization.py`
//! (`SemanticResult`, `ResolutionResult`, `PhaseResolutionReport`), adapted
//! to this crate's sum-type `Order` instead of the original's flat record.

use serde::{Deserialize, Serialize};

use crate::geo::RegionId;
use crate::nation::NationId;
use crate::order::Order;
use crate::parser::SyntaxResult;
use crate::time::{Phase, Season};
use crate::unit::{UnitId, UnitType};

/// The stable, wire-facing outcome taxonomy (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeType {
    MoveSuccess,
    MoveBounced,
    MoveNoConvoy,
    SupportSuccess,
    SupportCut,
    InvalidSupport,
    HoldSuccess,
    ConvoySuccess,
    InvalidConvoy,
    Dislodged,
    RetreatSuccess,
    RetreatFailed,
    BuildSuccess,
    BuildIllegalLocation,
    BuildNoCenter,
    DisbandSuccess,
    DisbandFailed,
}

/// The result of validating one parsed order against current state and
/// rules (C3's public output).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticResult {
    pub player_id: NationId,
    pub raw: String,
    pub normalized: String,
    pub order: Order,
    pub valid: bool,
    pub errors: Vec<String>,
}

/// The fully adjudicated fate of one unit (or build) within a phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub unit_id: Option<UnitId>,
    pub owner_id: NationId,
    pub unit_type: UnitType,
    pub origin_territory: RegionId,
    pub semantic_result: SemanticResult,
    pub outcome: OutcomeType,
    pub resolved_territory: RegionId,
    pub strength: u8,
    pub dislodged_by_id: Option<UnitId>,
    pub destination: Option<RegionId>,
    pub convoy_path: Option<Vec<RegionId>>,
    pub supported_unit_id: Option<UnitId>,
    pub duplicate_orders: Vec<SemanticResult>,
}

/// One resolved phase, suitable for persisting verbatim to
/// `reports/{turn_code}_report.json` (§6) and, when the phase was Movement
/// and at least one unit was dislodged, for being consumed by the
/// subsequent Retreat phase (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseResolutionReport {
    pub phase: Phase,
    pub season: Season,
    pub year: u32,
    pub valid_syntax: Vec<SyntaxResult>,
    pub valid_semantics: Vec<SemanticResult>,
    pub syntax_errors: Vec<SyntaxResult>,
    pub semantic_errors: Vec<SemanticResult>,
    pub resolution_results: Vec<ResolutionResult>,
}

impl PhaseResolutionReport {
    pub fn any_dislodged(&self) -> bool {
        self.resolution_results
            .iter()
            .any(|r| r.outcome == OutcomeType::Dislodged)
    }
}
