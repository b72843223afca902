//! §4.4(f) dislodgement and the post-convergence outcome assignment.

use crate::game::report::OutcomeType;
use crate::geo::Rules;
use crate::judge::soa::ResolutionSoA;
use crate::order::OrderKind;

/// A unit is dislodged iff it ended at its own origin while some
/// different-owner unit ended its move at that same occupancy space (§3:
/// a coast node and its parent are the same space). Conflict resolution
/// already forbids a same-owner unit from landing there, so any occupying
/// different-owner arrival is necessarily a dislodgement.
pub fn compute_dislodgement(soa: &mut ResolutionSoA, rules: &Rules) {
    let dest_index = soa.destination_index(rules);
    for i in 0..soa.len() {
        if soa.new_territory[i] != soa.orig_territory[i] {
            soa.dislodged[i] = false;
            continue;
        }
        let territory = rules.occupancy_key(&soa.orig_territory[i]);
        soa.dislodged[i] = dest_index
            .get(&territory)
            .into_iter()
            .flatten()
            .any(|&j| j != i && soa.owner_id[j] != soa.owner_id[i]);
    }
}

/// Finds the slot, if any, whose successful move ended at `territory`'s
/// occupancy space — used to populate `dislodged_by_id` once outcomes are
/// assigned.
pub fn mover_into(soa: &ResolutionSoA, territory: &crate::geo::RegionId, rules: &Rules) -> Option<usize> {
    let key = rules.occupancy_key(territory);
    (0..soa.len()).find(|&j| {
        rules.occupancy_key(&soa.new_territory[j]) == key
            && rules.occupancy_key(&soa.orig_territory[j]) != key
    })
}

pub fn assign_outcomes(soa: &mut ResolutionSoA) {
    for i in 0..soa.len() {
        let mut outcome = match &soa.order[i] {
            OrderKind::Move { destination } => {
                if soa.move_no_convoy[i] {
                    OutcomeType::MoveNoConvoy
                } else if &soa.new_territory[i] == destination {
                    OutcomeType::MoveSuccess
                } else {
                    OutcomeType::MoveBounced
                }
            }
            OrderKind::SupportHold { .. } | OrderKind::SupportMove { .. } => {
                if soa.invalid_support[i] {
                    OutcomeType::InvalidSupport
                } else if soa.support_cut[i] {
                    OutcomeType::SupportCut
                } else {
                    OutcomeType::SupportSuccess
                }
            }
            OrderKind::Convoy { .. } => {
                if soa.invalid_convoy[i] {
                    OutcomeType::InvalidConvoy
                } else {
                    OutcomeType::ConvoySuccess
                }
            }
            OrderKind::Hold => OutcomeType::HoldSuccess,
            _ => continue,
        };
        if soa.dislodged[i] {
            outcome = OutcomeType::Dislodged;
        }
        soa.outcome[i] = Some(outcome);
    }
}
