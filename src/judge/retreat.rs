//! §4.4 "Retreat phase resolver": adjudicates only the units the pending
//! Movement report marked `DISLODGED`, against the occupancy and standoff
//! state that report implies.

use std::collections::{HashMap, HashSet};

use crate::game::report::{OutcomeType, PhaseResolutionReport, ResolutionResult, SemanticResult};
use crate::geo::{RegionId, Rules};
use crate::nation::NationId;
use crate::order::{Order, OrderKind};
use crate::unit::UnitId;

/// Tiles occupied once Movement's successful moves and holds are in
/// place — everything but the dislodged units themselves, which never
/// reach the destination they were pushed out of.
pub fn occupied_after_movement(report: &PhaseResolutionReport) -> HashSet<RegionId> {
    report
        .resolution_results
        .iter()
        .filter(|r| r.outcome != OutcomeType::Dislodged)
        .map(|r| r.resolved_territory.clone())
        .collect()
}

/// Tiles that ended the Movement phase as a standoff — no retreat may
/// land on one (Design Notes, §9: source never checked this; the rule of
/// the game still requires it).
pub fn standoff_tiles(report: &PhaseResolutionReport) -> HashSet<RegionId> {
    report
        .resolution_results
        .iter()
        .filter(|r| r.outcome == OutcomeType::MoveBounced)
        .filter_map(|r| r.destination.clone())
        .collect()
}

fn attacker_origin(report: &PhaseResolutionReport, attacker: &UnitId) -> Option<RegionId> {
    report
        .resolution_results
        .iter()
        .find(|r| r.unit_id.as_ref() == Some(attacker))
        .map(|r| r.origin_territory.clone())
}

fn missing_retreat_order(origin: &RegionId, owner: &NationId) -> SemanticResult {
    SemanticResult {
        player_id: owner.clone(),
        raw: String::new(),
        normalized: String::new(),
        order: Order::hold(origin.clone()),
        valid: false,
        errors: vec!["no retreat order submitted".to_string()],
    }
}

/// Every dislodged unit either tentatively retreats or is destroyed
/// outright; tentative successes that land on the same tile then all
/// fail together (retreat standoff).
pub fn resolve_retreats(
    report: &PhaseResolutionReport,
    sem_by_unit: &HashMap<UnitId, SemanticResult>,
    rules: &Rules,
) -> Vec<ResolutionResult> {
    let occupied = occupied_after_movement(report);
    let standoffs = standoff_tiles(report);

    let dislodged: Vec<&ResolutionResult> = report
        .resolution_results
        .iter()
        .filter(|r| r.outcome == OutcomeType::Dislodged)
        .collect();

    let mut results: Vec<ResolutionResult> = Vec::with_capacity(dislodged.len());
    let mut tentative: HashMap<RegionId, Vec<usize>> = HashMap::new();

    for r in dislodged {
        let unit_id = r.unit_id.clone().expect("a dislodged result always names a unit");
        let semantic = sem_by_unit
            .get(&unit_id)
            .cloned()
            .unwrap_or_else(|| missing_retreat_order(&r.origin_territory, &r.owner_id));

        let attacker_origin = r
            .dislodged_by_id
            .as_ref()
            .and_then(|attacker| attacker_origin(report, attacker));

        let retreat_destination = match &semantic.order.kind {
            OrderKind::Retreat { destination } if semantic.valid => Some(destination.clone()),
            _ => None,
        };

        let eligible = match &retreat_destination {
            None => false,
            Some(destination) => {
                rules.is_adjacent(&r.origin_territory, destination, r.unit_type)
                    && Some(destination) != attacker_origin.as_ref()
                    && !occupied.contains(destination)
                    && !standoffs.contains(destination)
            }
        };

        let mut result = ResolutionResult {
            unit_id: Some(unit_id),
            owner_id: r.owner_id.clone(),
            unit_type: r.unit_type,
            origin_territory: r.origin_territory.clone(),
            semantic_result: semantic,
            outcome: OutcomeType::RetreatFailed,
            resolved_territory: r.origin_territory.clone(),
            strength: 1,
            dislodged_by_id: None,
            destination: retreat_destination.clone(),
            convoy_path: None,
            supported_unit_id: None,
            duplicate_orders: Vec::new(),
        };

        if eligible {
            result.outcome = OutcomeType::RetreatSuccess;
            result.resolved_territory = retreat_destination.expect("eligible implies a destination");
            tentative
                .entry(result.resolved_territory.clone())
                .or_default()
                .push(results.len());
        }

        results.push(result);
    }

    for indices in tentative.values() {
        if indices.len() > 1 {
            for &idx in indices {
                results[idx].outcome = OutcomeType::RetreatFailed;
                results[idx].resolved_territory = results[idx].origin_territory.clone();
            }
        }
    }

    results
}
