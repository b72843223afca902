//! Orchestrator-level skip decisions layered on [`crate::time::TurnCode`]'s
//! pure transition table (§3, §4.5 step 5): whether a Retreat or
//! Adjustment phase is actually played or silently skipped over.

use crate::game::state::GameState;
use crate::time::{Phase, TurnCode};

/// After a Movement phase: a Retreat with nothing dislodged is skipped
/// entirely; if that skip would land on a Winter-Adjustment nobody needs,
/// Adjustment is skipped too.
pub fn next_after_movement(code: TurnCode, any_dislodged: bool, state: &GameState) -> TurnCode {
    if any_dislodged {
        return code.advance();
    }
    skip_if_adjustment_unneeded(code.advance().advance(), state)
}

/// After a Retreat phase actually played.
pub fn next_after_retreat(code: TurnCode, state: &GameState) -> TurnCode {
    skip_if_adjustment_unneeded(code.advance(), state)
}

/// After an Adjustment phase actually played: always the next Spring-M.
pub fn next_after_adjustment(code: TurnCode) -> TurnCode {
    code.advance()
}

fn skip_if_adjustment_unneeded(code: TurnCode, state: &GameState) -> TurnCode {
    if code.phase == Phase::Adjustment && !adjustment_needed(state) {
        code.advance()
    } else {
        code
    }
}

/// §3: Adjustment may be skipped when force size already equals supply
/// count for every active nation.
pub fn adjustment_needed(state: &GameState) -> bool {
    state.players.values().filter(|p| p.is_active()).any(|p| {
        state.units_of(&p.nation_id).count() != state.supply_centers_of(&p.nation_id).count()
    })
}
