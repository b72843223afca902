//! §4.4 public contract: `resolve_movement`. Builds the fixed-size
//! structure-of-arrays for every live unit, normalizes submitted orders
//! onto it (implicit Hold for the unordered, first-wins for duplicates —
//! duplicate bookkeeping itself is the caller's concern, see
//! [`crate::judge::validate`]), then iterates passes (a)-(f) to a fixed
//! point before assigning outcomes.

use std::collections::HashMap;

use crate::game::report::SemanticResult;
use crate::game::state::GameState;
use crate::geo::Rules;
use crate::judge::error::ResolveError;
use crate::judge::soa::ResolutionSoA;
use crate::judge::{conflict, convoy, outcome, strength, support};
use crate::order::OrderKind;
use crate::unit::{Unit, UnitId, UnitType};

pub fn resolve_movement(
    sem_by_unit: &HashMap<UnitId, SemanticResult>,
    state: &GameState,
    rules: &Rules,
) -> Result<ResolutionSoA, ResolveError> {
    let mut units: Vec<&Unit> = state.units.values().collect();
    units.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

    let len = units.len();
    let mut soa = ResolutionSoA {
        unit_id: Vec::with_capacity(len),
        owner_id: Vec::with_capacity(len),
        unit_type: Vec::with_capacity(len),
        orig_territory: Vec::with_capacity(len),
        order: Vec::with_capacity(len),
        new_territory: Vec::with_capacity(len),
        strength: vec![1; len],
        dislodged: vec![false; len],
        support_cut: vec![false; len],
        move_no_convoy: vec![false; len],
        invalid_support: vec![false; len],
        invalid_convoy: vec![false; len],
        path_start: vec![0; len],
        path_len: vec![0; len],
        path_flat: Vec::new(),
        outcome: vec![None; len],
    };

    for unit in units {
        let kind = sem_by_unit
            .get(&unit.id)
            .map(|sr| sr.order.kind.clone())
            .unwrap_or(OrderKind::Hold);
        soa.unit_id.push(unit.id.clone());
        soa.owner_id.push(unit.owner_id.clone());
        soa.unit_type.push(unit.unit_type);
        soa.orig_territory.push(unit.territory_id.clone());
        soa.new_territory.push(unit.territory_id.clone());
        soa.order.push(kind);
    }

    support::mark_invalid_support(&mut soa, rules);
    convoy::mark_invalid_convoy(&mut soa);

    // Bounded fixed-point loop (Design Notes, §9): at most one pass per
    // slot can ever still be changing something by the time convergence
    // would otherwise have failed to happen.
    let bound = soa.len() + 1;
    let mut converged = soa.is_empty();
    for pass in 0..bound {
        let before = snapshot(&soa);

        convoy::discover_paths(&mut soa, rules);
        set_provisional_destinations(&mut soa, rules);
        support::compute_cuts(&mut soa, rules);
        strength::compute_strength(&mut soa, rules);
        conflict::resolve(&mut soa, rules);
        outcome::compute_dislodgement(&mut soa, rules);

        if snapshot(&soa) == before {
            log::trace!("resolver converged after {} pass(es)", pass + 1);
            converged = true;
            break;
        }
    }

    if !converged {
        log::error!("resolver failed to converge within {bound} passes over {} units", soa.len());
        return Err(ResolveError::NotConverged { passes: bound });
    }

    for i in 0..soa.len() {
        if let OrderKind::Move { destination } = &soa.order[i] {
            let at_origin = soa.new_territory[i] == soa.orig_territory[i];
            let at_destination = &soa.new_territory[i] == destination;
            if !at_origin && !at_destination {
                return Err(ResolveError::BadDestination {
                    slot: i,
                    unit_id: soa.unit_id[i].to_string(),
                    region: soa.new_territory[i].to_string(),
                });
            }
        }
    }

    outcome::assign_outcomes(&mut soa);
    Ok(soa)
}

/// §4.4(b): destinations adjacent by the mover's type resolve directly;
/// non-adjacent army moves fall back to whatever convoy path `(a)` found
/// this pass; fleets never convoy.
fn set_provisional_destinations(soa: &mut ResolutionSoA, rules: &Rules) {
    for i in 0..soa.len() {
        let destination = match &soa.order[i] {
            OrderKind::Move { destination } => destination.clone(),
            _ => continue,
        };
        let adjacent = rules.is_adjacent(&soa.orig_territory[i], &destination, soa.unit_type[i]);
        soa.new_territory[i] = if adjacent {
            destination
        } else if soa.unit_type[i] == UnitType::Army && !soa.move_no_convoy[i] {
            destination
        } else {
            soa.orig_territory[i].clone()
        };
    }
}

/// The subset of per-slot working state whose stability across a pass
/// defines convergence (§4.4 "Resolution proceeds as a fixed-point").
#[derive(PartialEq)]
struct Snapshot {
    new_territory: Vec<crate::geo::RegionId>,
    strength: Vec<u8>,
    dislodged: Vec<bool>,
    support_cut: Vec<bool>,
    move_no_convoy: Vec<bool>,
}

fn snapshot(soa: &ResolutionSoA) -> Snapshot {
    Snapshot {
        new_territory: soa.new_territory.clone(),
        strength: soa.strength.clone(),
        dislodged: soa.dislodged.clone(),
        support_cut: soa.support_cut.clone(),
        move_no_convoy: soa.move_no_convoy.clone(),
    }
}
