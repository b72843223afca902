//! C5: the phase orchestrator (§4.5). Drives C2 (parse) -> C3 (validate)
//! -> C4 (resolve) for whichever phase the loaded turn code names,
//! assembles the phase report, derives the next world state and turn
//! code, and persists both.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::game::error::{CoreError, StructuralError};
use crate::game::io::{load_json, save_json, GamesRoot};
use crate::game::report::{OutcomeType, PhaseResolutionReport, ResolutionResult, SemanticResult};
use crate::game::state::GameState;
use crate::game::turn;
use crate::geo::{RegionId, Rules};
use crate::judge::soa::ResolutionSoA;
use crate::judge::{self, adjustment, outcome, retreat};
use crate::nation::{NationId, NationStatus};
use crate::order::{Order, OrderKind};
use crate::parser::{self, SyntaxResult};
use crate::time::{Phase, Season, TurnCode};
use crate::unit::UnitId;

/// §4.5 public contract.
pub fn process_turn(games_root: &GamesRoot, rules: &Rules, game_id: &str) -> Result<GameState, CoreError> {
    log::info!("processing turn for game `{game_id}`");
    let mut state = GameState::load(games_root, game_id, rules)?;
    let code = state.turn_code()?;
    log::debug!("game `{game_id}` at turn {code}");

    let pending_report = load_pending_report(games_root, game_id, code)?;
    let raw_orders = load_orders_or_empty(&games_root.orders_path(game_id))?;

    let (mut valid_syntax, syntax_errors) = parse_all(&raw_orders, code.phase);
    valid_syntax.sort_by(|a, b| {
        (a.player_id.as_str(), a.normalized.as_str()).cmp(&(b.player_id.as_str(), b.normalized.as_str()))
    });
    log::debug!(
        "parsed {} valid, {} invalid raw orders",
        valid_syntax.len(),
        syntax_errors.len()
    );

    let (valid_semantics, semantic_errors) = validate_all(&valid_syntax, rules, &state, pending_report.as_ref());
    log::debug!(
        "validated {} valid, {} invalid semantic orders",
        valid_semantics.len(),
        semantic_errors.len()
    );

    let report = match code.phase {
        Phase::Movement => resolve_movement_phase(
            &mut state,
            rules,
            code,
            valid_syntax,
            syntax_errors,
            valid_semantics,
            semantic_errors,
        )?,
        Phase::Retreat => resolve_retreat_phase(
            &mut state,
            rules,
            code,
            pending_report.expect("Retreat phase always loads a pending Movement report"),
            valid_syntax,
            syntax_errors,
            valid_semantics,
            semantic_errors,
        ),
        Phase::Adjustment => resolve_adjustment_phase(
            &mut state,
            rules,
            code,
            valid_syntax,
            syntax_errors,
            valid_semantics,
            semantic_errors,
        ),
    };

    check_eliminations(&mut state);

    state.save(games_root, game_id)?;
    save_json(&games_root.report_path(game_id, &code), &report)?;
    log::info!("game `{game_id}` advanced to turn {}", state.meta.turn_code);

    Ok(state)
}

fn load_pending_report(
    games_root: &GamesRoot,
    game_id: &str,
    code: TurnCode,
) -> Result<Option<PhaseResolutionReport>, StructuralError> {
    if code.phase != Phase::Retreat {
        return Ok(None);
    }
    let movement_code = TurnCode::new(code.year_index, code.season, Phase::Movement);
    let report = load_json(&games_root.report_path(game_id, &movement_code)).map_err(|err| match err {
        StructuralError::MissingSaveFile(_) => StructuralError::MissingPendingReport {
            turn_code: movement_code.to_string(),
        },
        other => other,
    })?;
    Ok(Some(report))
}

fn load_orders_or_empty(path: &Path) -> Result<HashMap<NationId, Vec<String>>, StructuralError> {
    match load_json(path) {
        Ok(orders) => Ok(orders),
        Err(StructuralError::MissingSaveFile(_)) => Ok(HashMap::new()),
        Err(other) => Err(other),
    }
}

fn parse_all(
    raw_orders: &HashMap<NationId, Vec<String>>,
    phase: Phase,
) -> (Vec<SyntaxResult>, Vec<SyntaxResult>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for (nation, raws) in raw_orders {
        for raw in raws {
            let syntax = parser::parse(nation, raw, phase);
            if syntax.valid {
                valid.push(syntax);
            } else {
                invalid.push(syntax);
            }
        }
    }
    (valid, invalid)
}

fn validate_all(
    valid_syntax: &[SyntaxResult],
    rules: &Rules,
    state: &GameState,
    pending_report: Option<&PhaseResolutionReport>,
) -> (Vec<SemanticResult>, Vec<SemanticResult>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for syntax in valid_syntax {
        let semantic = judge::validate(syntax, rules, state, pending_report);
        if semantic.valid {
            valid.push(semantic);
        } else {
            invalid.push(semantic);
        }
    }
    (valid, invalid)
}

/// Groups already-deterministically-ordered valid semantic results by the
/// live unit standing at each order's origin: first one wins, the rest
/// fold into `duplicates` (§5 "Ordering guarantees").
fn group_by_unit(
    state: &GameState,
    rules: &Rules,
    valid_semantics: &[SemanticResult],
) -> (HashMap<UnitId, SemanticResult>, HashMap<UnitId, Vec<SemanticResult>>) {
    let mut primary: HashMap<UnitId, SemanticResult> = HashMap::new();
    let mut duplicates: HashMap<UnitId, Vec<SemanticResult>> = HashMap::new();
    for sem in valid_semantics {
        let Some(unit) = state.unit_at(&sem.order.origin, rules) else {
            continue;
        };
        let unit_id = unit.id.clone();
        if primary.contains_key(&unit_id) {
            duplicates.entry(unit_id).or_default().push(sem.clone());
        } else {
            primary.insert(unit_id, sem.clone());
        }
    }
    (primary, duplicates)
}

fn implicit_hold(origin: &RegionId, owner: &NationId) -> SemanticResult {
    SemanticResult {
        player_id: owner.clone(),
        raw: String::new(),
        normalized: String::new(),
        order: Order::hold(origin.clone()),
        valid: true,
        errors: Vec::new(),
    }
}

fn build_movement_results(
    soa: &ResolutionSoA,
    rules: &Rules,
    sem_by_unit: &HashMap<UnitId, SemanticResult>,
    duplicates_by_unit: &HashMap<UnitId, Vec<SemanticResult>>,
) -> Vec<ResolutionResult> {
    let origin_index = soa.origin_index(rules);
    (0..soa.len())
        .map(|i| {
            let unit_id = soa.unit_id[i].clone();
            let semantic_result = sem_by_unit
                .get(&unit_id)
                .cloned()
                .unwrap_or_else(|| implicit_hold(&soa.orig_territory[i], &soa.owner_id[i]));
            let duplicate_orders = duplicates_by_unit.get(&unit_id).cloned().unwrap_or_default();

            let dislodged_by_id = if soa.dislodged[i] {
                outcome::mover_into(soa, &soa.orig_territory[i], rules).map(|j| soa.unit_id[j].clone())
            } else {
                None
            };

            let supported_unit_id = match &soa.order[i] {
                OrderKind::SupportHold { support_origin }
                | OrderKind::SupportMove { support_origin, .. } => origin_index
                    .get(&rules.occupancy_key(support_origin))
                    .map(|&j| soa.unit_id[j].clone()),
                _ => None,
            };

            let destination = match &soa.order[i] {
                OrderKind::Move { destination } => Some(destination.clone()),
                _ => None,
            };

            let convoy_path = match &soa.order[i] {
                OrderKind::Move { .. } => {
                    let path = soa.convoy_path(i);
                    (!path.is_empty()).then(|| path.to_vec())
                }
                _ => None,
            };

            ResolutionResult {
                unit_id: Some(unit_id),
                owner_id: soa.owner_id[i].clone(),
                unit_type: soa.unit_type[i],
                origin_territory: soa.orig_territory[i].clone(),
                semantic_result,
                outcome: soa.outcome[i].expect("outcomes are assigned before report assembly"),
                resolved_territory: soa.new_territory[i].clone(),
                strength: soa.strength[i],
                dislodged_by_id,
                destination,
                convoy_path,
                supported_unit_id,
                duplicate_orders,
            }
        })
        .collect()
}

/// Moves units in the unit table (and the derived territory index) to
/// match a set of already-adjudicated results.
fn apply_resolution_results(state: &mut GameState, rules: &Rules, results: &[ResolutionResult]) {
    for r in results {
        let Some(unit_id) = &r.unit_id else { continue };
        state.relocate_unit(unit_id, r.resolved_territory.clone(), rules);
    }
}

/// §4.5 step 5, final clause: any supply-center region whose occupant's
/// owner differs from the stored owner flips to the occupant.
fn recompute_ownership(state: &mut GameState, rules: &Rules) {
    let occupant_owner: HashMap<RegionId, NationId> = state
        .units
        .values()
        .map(|u| (rules.occupancy_key(&u.territory_id), u.owner_id.clone()))
        .collect();

    for region in rules.regions() {
        if !rules.is_supply_center(region) {
            continue;
        }
        if let Some(owner) = occupant_owner.get(region) {
            state.territory_state.insert(region.clone(), owner.clone());
        }
    }
}

/// §3 lifecycle, §4.5 step 6: any nation holding no territory at all is
/// eliminated.
fn check_eliminations(state: &mut GameState) {
    let owning: HashSet<NationId> = state.territory_state.values().cloned().collect();
    for nation in state.players.values_mut() {
        if nation.is_active() && !owning.contains(&nation.nation_id) {
            nation.status = NationStatus::Eliminated;
        }
    }
}

fn resolve_movement_phase(
    state: &mut GameState,
    rules: &Rules,
    code: TurnCode,
    valid_syntax: Vec<SyntaxResult>,
    syntax_errors: Vec<SyntaxResult>,
    valid_semantics: Vec<SemanticResult>,
    semantic_errors: Vec<SemanticResult>,
) -> Result<PhaseResolutionReport, CoreError> {
    let (sem_by_unit, duplicates_by_unit) = group_by_unit(state, rules, &valid_semantics);
    let soa = judge::resolve_movement(&sem_by_unit, state, rules)?;
    let resolution_results = build_movement_results(&soa, rules, &sem_by_unit, &duplicates_by_unit);

    let any_dislodged = resolution_results
        .iter()
        .any(|r| r.outcome == OutcomeType::Dislodged);
    if any_dislodged {
        log::info!("movement at {code} dislodged at least one unit; deferring to retreat");
    }

    // Successful moves and holds are applied immediately only when no
    // unit was dislodged this phase; the dislodged case defers every
    // change (including the other units' successful moves) until the
    // subsequent Retreat resolves, so the whole phase settles atomically
    // (resolved in favor of "the deferred changes land with the
    // retreat", see DESIGN.md).
    if !any_dislodged {
        apply_resolution_results(state, rules, &resolution_results);
        if code.season == Season::Fall {
            recompute_ownership(state, rules);
        }
    }

    let next_code = turn::next_after_movement(code, any_dislodged, state);
    state.set_turn_code(next_code);

    Ok(PhaseResolutionReport {
        phase: code.phase,
        season: code.season,
        year: code.year(),
        valid_syntax,
        valid_semantics,
        syntax_errors,
        semantic_errors,
        resolution_results,
    })
}

fn resolve_retreat_phase(
    state: &mut GameState,
    rules: &Rules,
    code: TurnCode,
    pending_report: PhaseResolutionReport,
    valid_syntax: Vec<SyntaxResult>,
    syntax_errors: Vec<SyntaxResult>,
    valid_semantics: Vec<SemanticResult>,
    semantic_errors: Vec<SemanticResult>,
) -> PhaseResolutionReport {
    let deferred: Vec<ResolutionResult> = pending_report
        .resolution_results
        .iter()
        .filter(|r| r.outcome != OutcomeType::Dislodged)
        .cloned()
        .collect();
    apply_resolution_results(state, rules, &deferred);

    let (sem_by_unit, duplicates_by_unit) = group_by_unit(state, rules, &valid_semantics);
    let mut resolution_results = retreat::resolve_retreats(&pending_report, &sem_by_unit, rules);

    for result in &mut resolution_results {
        let Some(unit_id) = result.unit_id.clone() else { continue };
        match result.outcome {
            OutcomeType::RetreatSuccess => {
                state.relocate_unit(&unit_id, result.resolved_territory.clone(), rules);
            }
            OutcomeType::RetreatFailed => state.remove_unit(&unit_id, rules),
            _ => {}
        }
        if let Some(extra) = duplicates_by_unit.get(&unit_id) {
            result.duplicate_orders.extend(extra.iter().cloned());
        }
    }

    if code.season == Season::Fall {
        recompute_ownership(state, rules);
    }

    let next_code = turn::next_after_retreat(code, state);
    state.set_turn_code(next_code);

    PhaseResolutionReport {
        phase: code.phase,
        season: code.season,
        year: code.year(),
        valid_syntax,
        valid_semantics,
        syntax_errors,
        semantic_errors,
        resolution_results,
    }
}

fn resolve_adjustment_phase(
    state: &mut GameState,
    rules: &Rules,
    code: TurnCode,
    valid_syntax: Vec<SyntaxResult>,
    syntax_errors: Vec<SyntaxResult>,
    valid_semantics: Vec<SemanticResult>,
    semantic_errors: Vec<SemanticResult>,
) -> PhaseResolutionReport {
    let mut semantics_by_nation: HashMap<NationId, Vec<SemanticResult>> = HashMap::new();
    for sem in &valid_semantics {
        semantics_by_nation
            .entry(sem.player_id.clone())
            .or_default()
            .push(sem.clone());
    }

    let outcome = adjustment::resolve_adjustment(&semantics_by_nation, state, rules);

    for unit_id in &outcome.disbanded {
        state.remove_unit(unit_id, rules);
    }
    for unit in outcome.built {
        state.insert_unit(unit, rules);
    }
    state.meta.counters = outcome.counters;

    recompute_ownership_noop(state);

    let next_code = turn::next_after_adjustment(code);
    state.set_turn_code(next_code);

    PhaseResolutionReport {
        phase: code.phase,
        season: code.season,
        year: code.year(),
        valid_syntax,
        valid_semantics,
        syntax_errors,
        semantic_errors,
        resolution_results: outcome.results,
    }
}

/// Adjustment changes unit counts, never occupancy, so supply-center
/// ownership itself cannot change here; §4.5 step 5 still calls for a
/// recompute pass "after Adjustment" for symmetry with the Fall-Movement
/// case, which this documents as a deliberate no-op rather than an
/// oversight.
fn recompute_ownership_noop(_state: &GameState) {}
