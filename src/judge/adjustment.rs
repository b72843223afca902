//! §4.4 "Adjustment phase resolver": Build/Disband orders are not tied to
//! an existing unit slot the way Movement/Retreat orders are, so this
//! resolver works from nation-grouped semantic results rather than the
//! structure-of-arrays the other phases share.

use std::collections::HashMap;

use crate::game::report::{OutcomeType, ResolutionResult, SemanticResult};
use crate::game::state::GameState;
use crate::geo::{RegionId, Rules};
use crate::nation::NationId;
use crate::order::OrderKind;
use crate::unit::{Unit, UnitId, UnitType};

/// The decisions C5 applies to the unit table: which existing units to
/// remove, which new ones to create, and the counter table those
/// creations bumped (§3: counters only ever increase).
pub struct AdjustmentOutcome {
    pub results: Vec<ResolutionResult>,
    pub disbanded: Vec<UnitId>,
    pub built: Vec<Unit>,
    pub counters: HashMap<String, u32>,
}

fn counter_key(owner: &NationId, unit_type: UnitType) -> String {
    format!("{}_{}", owner.as_str(), unit_type)
}

fn blank_result(
    unit_id: Option<UnitId>,
    owner_id: NationId,
    unit_type: UnitType,
    origin: RegionId,
    semantic_result: SemanticResult,
    outcome: OutcomeType,
) -> ResolutionResult {
    ResolutionResult {
        unit_id,
        owner_id,
        unit_type,
        origin_territory: origin.clone(),
        semantic_result,
        outcome,
        resolved_territory: origin,
        strength: 1,
        dislodged_by_id: None,
        destination: None,
        convoy_path: None,
        supported_unit_id: None,
        duplicate_orders: Vec::new(),
    }
}

/// For each nation: `units` is its current unit count, `centers` its
/// owned-supply-center count after Fall. Disbands always succeed (the
/// validator already confirmed the unit belongs to the player); Builds
/// succeed only while `units + accepted_so_far + 1 <= centers`. A second
/// Disband of the same unit, or a second Build on the same territory,
/// folds onto the first result's `duplicate_orders`.
pub fn resolve_adjustment(
    semantics_by_nation: &HashMap<NationId, Vec<SemanticResult>>,
    state: &GameState,
    rules: &Rules,
) -> AdjustmentOutcome {
    let mut results = Vec::new();
    let mut disbanded = Vec::new();
    let mut built = Vec::new();
    let mut counters = state.meta.counters.clone();

    for (nation, orders) in semantics_by_nation {
        let units_count = state.units_of(nation).count() as i64;
        let centers_count = state.supply_centers_of(nation).count() as i64;
        let mut accepted_builds: i64 = 0;

        let mut seen_disbands: HashMap<UnitId, usize> = HashMap::new();
        let mut seen_builds: HashMap<RegionId, usize> = HashMap::new();

        for order in orders {
            match &order.order.kind {
                OrderKind::Disband { .. } => {
                    let unit = match state.unit_at(&order.order.origin, rules) {
                        Some(unit) => unit,
                        None => continue,
                    };
                    let unit_id = unit.id.clone();
                    if let Some(&first) = seen_disbands.get(&unit_id) {
                        results[first].duplicate_orders.push(order.clone());
                        continue;
                    }
                    seen_disbands.insert(unit_id.clone(), results.len());
                    disbanded.push(unit_id.clone());
                    results.push(blank_result(
                        Some(unit_id),
                        nation.clone(),
                        unit.unit_type,
                        order.order.origin.clone(),
                        order.clone(),
                        OutcomeType::DisbandSuccess,
                    ));
                }
                OrderKind::Build { unit_type } => {
                    if let Some(&first) = seen_builds.get(&order.order.origin) {
                        results[first].duplicate_orders.push(order.clone());
                        continue;
                    }
                    seen_builds.insert(order.order.origin.clone(), results.len());

                    if units_count + accepted_builds + 1 <= centers_count {
                        accepted_builds += 1;
                        let key = counter_key(nation, *unit_type);
                        let next = counters.get(&key).copied().unwrap_or(0) + 1;
                        counters.insert(key, next);
                        let unit_id = UnitId::new(nation, *unit_type, next);
                        built.push(Unit {
                            id: unit_id.clone(),
                            unit_type: *unit_type,
                            owner_id: nation.clone(),
                            territory_id: order.order.origin.clone(),
                        });
                        results.push(blank_result(
                            Some(unit_id),
                            nation.clone(),
                            *unit_type,
                            order.order.origin.clone(),
                            order.clone(),
                            OutcomeType::BuildSuccess,
                        ));
                    } else {
                        results.push(blank_result(
                            None,
                            nation.clone(),
                            *unit_type,
                            order.order.origin.clone(),
                            order.clone(),
                            OutcomeType::BuildNoCenter,
                        ));
                    }
                }
                _ => continue,
            }
        }
    }

    AdjustmentOutcome {
        results,
        disbanded,
        built,
        counters,
    }
}
