//! C3: the semantic validator (§4.3). Side-effect free: checks one parsed
//! order against current state and rules, collecting every violated
//! constraint rather than stopping at the first (the spec permits either;
//! the fuller report is more useful to a player correcting a rejected
//! order).

use crate::game::report::{OutcomeType, PhaseResolutionReport, SemanticResult};
use crate::game::state::GameState;
use crate::geo::{RegionId, Rules, Terrain};
use crate::judge::retreat::{occupied_after_movement, standoff_tiles};
use crate::nation::NationId;
use crate::order::{Order, OrderKind};
use crate::parser::SyntaxResult;
use crate::UnitType;

/// §4.3 public contract. `pending_report` is the prior Movement phase's
/// report, required only to validate Retreat orders.
pub fn validate(
    syntax: &SyntaxResult,
    rules: &Rules,
    state: &GameState,
    pending_report: Option<&PhaseResolutionReport>,
) -> SemanticResult {
    let order = match (&syntax.order, syntax.valid) {
        (Some(order), true) => order.clone(),
        _ => {
            return SemanticResult {
                player_id: syntax.player_id.clone(),
                raw: syntax.raw.clone(),
                normalized: syntax.normalized.clone(),
                order: Order::hold(RegionId::new("")),
                valid: false,
                errors: vec!["no syntactically valid order to validate".to_string()],
            };
        }
    };

    let mut errors = Vec::new();

    match &order.kind {
        OrderKind::Hold
        | OrderKind::Move { .. }
        | OrderKind::SupportHold { .. }
        | OrderKind::SupportMove { .. }
        | OrderKind::Convoy { .. } => {
            check_occupied_and_owned(&order.origin, &syntax.player_id, state, rules, &mut errors);
        }
        OrderKind::Build { .. } | OrderKind::Disband { .. } | OrderKind::Retreat { .. } => {}
    }

    let unit_type = state.unit_at(&order.origin, rules).map(|u| u.unit_type);

    match &order.kind {
        OrderKind::Hold => {}
        OrderKind::Move { destination } => {
            check_reach_with_convoy(&order.origin, destination, unit_type, rules, &mut errors);
        }
        OrderKind::SupportHold { support_origin } => {
            check_adjacent(&order.origin, support_origin, unit_type, rules, &mut errors);
        }
        OrderKind::SupportMove {
            support_origin,
            support_destination,
        } => {
            check_adjacent(&order.origin, support_destination, unit_type, rules, &mut errors);
            if state.unit_at(support_origin, rules).is_none() {
                errors.push(format!("no unit at {}", support_origin.as_str()));
            }
        }
        OrderKind::Convoy {
            convoy_origin,
            convoy_destination,
        } => check_convoy(&order.origin, convoy_origin, convoy_destination, rules, state, &mut errors),
        OrderKind::Build { unit_type } => {
            check_build(&order.origin, &syntax.player_id, *unit_type, rules, state, &mut errors)
        }
        OrderKind::Disband { unit_type } => {
            check_disband(&order.origin, &syntax.player_id, *unit_type, state, rules, &mut errors)
        }
        OrderKind::Retreat { destination } => check_retreat(
            &order.origin,
            destination,
            &syntax.player_id,
            state,
            rules,
            pending_report,
            &mut errors,
        ),
    }

    SemanticResult {
        player_id: syntax.player_id.clone(),
        raw: syntax.raw.clone(),
        normalized: syntax.normalized.clone(),
        order,
        valid: errors.is_empty(),
        errors,
    }
}

fn check_occupied_and_owned(
    origin: &RegionId,
    player_id: &NationId,
    state: &GameState,
    rules: &Rules,
    errors: &mut Vec<String>,
) {
    match state.unit_at(origin, rules) {
        None => errors.push(format!("no unit at {}", origin.as_str())),
        Some(unit) if &unit.owner_id != player_id => {
            errors.push(format!("unit at {} does not belong to {}", origin.as_str(), player_id.as_str()))
        }
        Some(_) => {}
    }
}

/// A plain adjacency check, used for support targets: unlike a Move, a
/// Support is never carried by convoy.
fn check_adjacent(
    origin: &RegionId,
    target: &RegionId,
    unit_type: Option<UnitType>,
    rules: &Rules,
    errors: &mut Vec<String>,
) {
    let Some(unit_type) = unit_type else { return };
    if !rules.is_adjacent(origin, target, unit_type) {
        errors.push(format!("{} is not adjacent to {}", target.as_str(), origin.as_str()));
    }
}

/// A Move's reach check additionally allows an army to target a
/// non-adjacent coastal land region when a sea-path of fleet-traversable
/// nodes connects origin to destination (§4.3 "allow_convoy branch").
fn check_reach_with_convoy(
    origin: &RegionId,
    destination: &RegionId,
    unit_type: Option<UnitType>,
    rules: &Rules,
    errors: &mut Vec<String>,
) {
    let Some(unit_type) = unit_type else { return };
    if rules.is_adjacent(origin, destination, unit_type) {
        return;
    }
    if unit_type == UnitType::Army && rules.fleet_path_exists(origin, destination) {
        return;
    }
    errors.push(format!("{} is not reachable from {}", destination.as_str(), origin.as_str()));
}

fn check_convoy(
    origin: &RegionId,
    convoy_origin: &RegionId,
    convoy_destination: &RegionId,
    rules: &Rules,
    state: &GameState,
    errors: &mut Vec<String>,
) {
    match state.unit_at(origin, rules) {
        Some(unit) if unit.unit_type == UnitType::Fleet && rules.type_of(origin) == Some(Terrain::Sea) => {}
        _ => errors.push(format!("no fleet at sea at {}", origin.as_str())),
    }
    match state.unit_at(convoy_origin, rules) {
        Some(unit) if unit.unit_type == UnitType::Army => {}
        _ => errors.push(format!("no army to convoy at {}", convoy_origin.as_str())),
    }
    if !rules.fleet_path_exists(convoy_origin, convoy_destination) {
        errors.push(format!(
            "no sea path from {} to {}",
            convoy_origin.as_str(),
            convoy_destination.as_str()
        ));
    }
}

fn check_build(
    origin: &RegionId,
    player_id: &NationId,
    unit_type: UnitType,
    rules: &Rules,
    state: &GameState,
    errors: &mut Vec<String>,
) {
    if !rules.is_home_of(player_id, origin) {
        errors.push(format!("{} is not a home center of {}", origin.as_str(), player_id.as_str()));
    }
    if state.territory_state.get(origin) != Some(player_id) {
        errors.push(format!("{} does not currently own {}", player_id.as_str(), origin.as_str()));
    }
    if state.unit_at(origin, rules).is_some() {
        errors.push(format!("{} is occupied", origin.as_str()));
    }
    let units = state.units_of(player_id).count();
    let centers = state.supply_centers_of(player_id).count();
    if units >= centers {
        errors.push(format!("{} already has units ({units}) >= supply centers ({centers})", player_id.as_str()));
    }
    if unit_type == UnitType::Fleet && rules.type_of(origin) == Some(Terrain::Land) {
        errors.push(format!("fleets may only be built on coastal regions, not {}", origin.as_str()));
    }
}

fn check_disband(
    origin: &RegionId,
    player_id: &NationId,
    unit_type: UnitType,
    state: &GameState,
    rules: &Rules,
    errors: &mut Vec<String>,
) {
    match state.unit_at(origin, rules) {
        None => errors.push(format!("no unit to disband at {}", origin.as_str())),
        Some(unit) => {
            if &unit.owner_id != player_id {
                errors.push(format!("unit at {} does not belong to {}", origin.as_str(), player_id.as_str()));
            }
            if unit.unit_type != unit_type {
                errors.push(format!(
                    "declared type {unit_type} does not match the {} at {}",
                    unit.unit_type,
                    origin.as_str()
                ));
            }
        }
    }
}

fn check_retreat(
    origin: &RegionId,
    destination: &RegionId,
    player_id: &NationId,
    state: &GameState,
    rules: &Rules,
    pending_report: Option<&PhaseResolutionReport>,
    errors: &mut Vec<String>,
) {
    let _ = state;
    let Some(report) = pending_report else {
        errors.push("no pending Movement report to validate a retreat against".to_string());
        return;
    };

    let dislodged = report
        .resolution_results
        .iter()
        .find(|r| &r.origin_territory == origin && r.outcome == OutcomeType::Dislodged);

    let Some(result) = dislodged else {
        errors.push(format!("{} is not a dislodged unit in the pending report", origin.as_str()));
        return;
    };

    if &result.owner_id != player_id {
        errors.push(format!("unit at {} does not belong to {}", origin.as_str(), player_id.as_str()));
    }
    if !rules.is_adjacent(origin, destination, result.unit_type) {
        errors.push(format!("{} is not adjacent to {}", destination.as_str(), origin.as_str()));
    }

    let attacker_origin = result.dislodged_by_id.as_ref().and_then(|attacker| {
        report
            .resolution_results
            .iter()
            .find(|r| r.unit_id.as_ref() == Some(attacker))
            .map(|r| r.origin_territory.clone())
    });
    if attacker_origin.as_ref() == Some(destination) {
        errors.push(format!("{} is the attacker's origin", destination.as_str()));
    }
    if occupied_after_movement(report).contains(destination) {
        errors.push(format!("{} is occupied", destination.as_str()));
    }
    if standoff_tiles(report).contains(destination) {
        errors.push(format!("{} was a standoff tile", destination.as_str()));
    }
}
