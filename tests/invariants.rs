//! The quantified invariants and round-trip properties of the
//! testable-properties section, checked directly against fixture runs
//! rather than through property-based generation: the domain (typed
//! orders against a small, hand-built map) does not lend itself to a
//! meaningful `proptest` strategy the way the wire-level parsing in
//! `src/parser/mod.rs` and `src/time.rs` already does with plain example-
//! based tests.

#[path = "./support.rs"]
mod support;

use std::collections::HashSet;

use septarchy::game::report::{OutcomeType, PhaseResolutionReport};
use septarchy::game::{self};
use septarchy::geo::{Mode, RegionId};
use septarchy::order::{Order, OrderKind};
use septarchy::UnitType;

use support::*;

fn report_for(games_root: &game::GamesRoot, game_id: &str, turn_code: &str) -> PhaseResolutionReport {
    let code = turn_code.parse().unwrap();
    game::io::load_json(&games_root.report_path(game_id, &code)).unwrap()
}

/// Every raw order's syntax outcome lands in exactly one of `valid_syntax`
/// / `syntax_errors`; every syntactically-valid order's semantic outcome
/// lands in exactly one of `valid_semantics` / `semantic_errors`; and every
/// semantically-valid order is consumed by exactly one resolution result,
/// either as that result's own order or folded into its `duplicate_orders`.
#[test]
fn every_order_is_accounted_for_exactly_once() {
    let rules = world_rules();
    let games_root = temp_games_root("partition-invariant");
    let game_id = "g1";

    let state = game_state(
        &rules,
        "1901-S-M",
        &["ENG"],
        vec![unit("ENG", UnitType::Army, 1, "lon")],
        &[("lon", "ENG")],
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(
        &games_root,
        game_id,
        &[(
            "ENG",
            &[
                "lon - wal",   // valid syntax, valid semantics, becomes the primary order
                "bur bur",     // not a recognized shape at all
                "xyz - wal",   // valid syntax, but no unit at xyz
                "lon hold",    // valid syntax and semantics, but a duplicate order on lon's unit
            ],
        )],
    );

    game::process_turn(&games_root, &rules, game_id).unwrap();
    let report = report_for(&games_root, game_id, "1901-S-M");

    let raw_submitted = 4;
    assert_eq!(report.valid_syntax.len() + report.syntax_errors.len(), raw_submitted);

    let syntax_raws: HashSet<&str> = report
        .valid_syntax
        .iter()
        .map(|s| s.raw.as_str())
        .chain(report.syntax_errors.iter().map(|s| s.raw.as_str()))
        .collect();
    assert_eq!(syntax_raws.len(), raw_submitted, "no raw order counted twice at the syntax stage");
    assert!(report.syntax_errors.iter().any(|s| s.raw == "bur bur"));

    assert_eq!(
        report.valid_semantics.len() + report.semantic_errors.len(),
        report.valid_syntax.len(),
        "every syntactically valid order gets exactly one semantic verdict"
    );
    assert!(report.semantic_errors.iter().any(|s| s.raw == "xyz - wal"));

    let consumed: usize = report
        .resolution_results
        .iter()
        .map(|r| 1 + r.duplicate_orders.len())
        .sum();
    assert_eq!(
        consumed,
        report.valid_semantics.len(),
        "every semantically valid order is either a result's own order or one of its duplicates"
    );

    let lon_result = report
        .resolution_results
        .iter()
        .find(|r| r.origin_territory == RegionId::new("lon"))
        .unwrap();
    assert_eq!(lon_result.duplicate_orders.len(), 1);
    assert_eq!(lon_result.duplicate_orders[0].raw, "lon hold");
}

#[test]
fn move_success_lands_exactly_on_its_destination_and_owns_the_tile_alone() {
    let rules = world_rules();
    let games_root = temp_games_root("move-success-invariant");
    let game_id = "g1";

    let state = game_state(
        &rules,
        "1901-S-M",
        &["ENG"],
        vec![unit("ENG", UnitType::Army, 1, "lon")],
        &[("lon", "ENG")],
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(&games_root, game_id, &[("ENG", &["lon-wal"])]);

    game::process_turn(&games_root, &rules, game_id).unwrap();
    let report = report_for(&games_root, game_id, "1901-S-M");

    for result in &report.resolution_results {
        if result.outcome != OutcomeType::MoveSuccess {
            continue;
        }
        assert_eq!(Some(result.resolved_territory.clone()), result.destination);
        let contested = report.resolution_results.iter().filter(|other| {
            other.resolved_territory == result.resolved_territory
                && matches!(
                    other.outcome,
                    OutcomeType::MoveSuccess
                        | OutcomeType::HoldSuccess
                        | OutcomeType::RetreatSuccess
                        | OutcomeType::BuildSuccess
                )
        });
        assert_eq!(contested.count(), 1, "exactly one settled occupant per tile");
    }
}

#[test]
fn dislodged_names_its_attacker_and_the_attacker_landed_at_its_origin() {
    let rules = world_rules();
    let games_root = temp_games_root("dislodged-invariant");
    let game_id = "g1";

    let state = game_state(
        &rules,
        "1901-S-M",
        &["P1", "P2"],
        vec![
            unit("P1", UnitType::Army, 1, "bel"),
            unit("P2", UnitType::Army, 2, "pic"),
            unit("P2", UnitType::Fleet, 1, "nth"),
        ],
        &[("bel", "P1"), ("pic", "P2")],
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(
        &games_root,
        game_id,
        &[("P2", &["pic-bel", "nth s pic-bel"]), ("P1", &["bel hold"])],
    );

    game::process_turn(&games_root, &rules, game_id).unwrap();
    let report = report_for(&games_root, game_id, "1901-S-M");

    let dislodged: Vec<_> = report
        .resolution_results
        .iter()
        .filter(|r| r.outcome == OutcomeType::Dislodged)
        .collect();
    assert_eq!(dislodged.len(), 1);

    let victim = dislodged[0];
    let attacker_id = victim.dislodged_by_id.as_ref().expect("a dislodged unit names its attacker");
    let attacker = report
        .resolution_results
        .iter()
        .find(|r| r.unit_id.as_ref() == Some(attacker_id))
        .expect("the named attacker has its own resolution result");
    assert_eq!(attacker.outcome, OutcomeType::MoveSuccess);
    assert_eq!(attacker.resolved_territory, victim.origin_territory);
}

#[test]
fn adjacency_is_symmetric() {
    let rules = world_rules();
    for (from, to, mode) in rules.edges() {
        assert!(
            rules.edges().contains(&(to.clone(), from.clone(), *mode)),
            "missing reverse edge for ({from}, {to}, {mode:?})"
        );
    }
}

#[test]
fn counters_never_decrease_across_build_and_disband() {
    let rules = world_rules();
    let games_root = temp_games_root("counter-monotonicity");
    let game_id = "g1";

    let mut state = game_state(
        &rules,
        "1901-W-A",
        &["G"],
        vec![unit("G", UnitType::Army, 1, "wal")],
        &[("ber", "G"), ("wal", "G")],
    );
    state.meta.counters.insert("G_army".to_string(), 1);
    state.save(&games_root, game_id).unwrap();
    write_orders(&games_root, game_id, &[("G", &["build army ber"])]);

    let after_build = game::process_turn(&games_root, &rules, game_id).unwrap();
    let first_counter = after_build.meta.counters["G_army"];
    assert_eq!(first_counter, 2);

    // Disband the unit that was just built, then build again: the counter
    // must keep climbing rather than reuse the id just freed.
    write_orders(&games_root, game_id, &[("G", &["disband army ber"])]);
    let after_disband = game::process_turn(&games_root, &rules, game_id).unwrap();
    assert_eq!(after_disband.meta.counters["G_army"], first_counter);

    write_orders(&games_root, game_id, &[("G", &["build army ber"])]);
    let after_second_build = game::process_turn(&games_root, &rules, game_id).unwrap();
    let second_counter = after_second_build.meta.counters["G_army"];
    assert!(second_counter > first_counter, "counters never reuse a prior suffix");

    for unit in after_second_build.units.values() {
        if let Some(suffix) = unit.id.counter() {
            assert!(suffix <= second_counter);
        }
    }
}

#[test]
fn winter_adjustment_brings_every_active_nation_to_units_equals_centers() {
    let rules = world_rules();
    let games_root = temp_games_root("winter-balance-invariant");
    let game_id = "g1";

    let state = game_state(
        &rules,
        "1901-W-A",
        &["G"],
        vec![
            unit("G", UnitType::Army, 1, "wal"),
            unit("G", UnitType::Army, 2, "bur"),
            unit("G", UnitType::Army, 3, "pic"),
        ],
        &[("ber", "G"), ("wal", "G"), ("bur", "G"), ("pic", "G")],
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(&games_root, game_id, &[("G", &["build army ber"])]);

    let after = game::process_turn(&games_root, &rules, game_id).unwrap();
    for nation in after.players.values().filter(|n| n.is_active()) {
        assert_eq!(
            after.units_of(&nation.nation_id).count(),
            after.supply_centers_of(&nation.nation_id).count()
        );
    }
}

#[test]
fn phase_resolution_report_round_trips_through_json() {
    let rules = world_rules();
    let games_root = temp_games_root("report-round-trip");
    let game_id = "g1";

    let state = game_state(
        &rules,
        "1901-S-M",
        &["ENG"],
        vec![unit("ENG", UnitType::Army, 1, "lon")],
        &[("lon", "ENG")],
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(&games_root, game_id, &[("ENG", &["lon-wal"])]);
    game::process_turn(&games_root, &rules, game_id).unwrap();

    let report = report_for(&games_root, game_id, "1901-S-M");
    let once = serde_json::to_string(&report).unwrap();
    let parsed: PhaseResolutionReport = serde_json::from_str(&once).unwrap();
    let twice = serde_json::to_string(&parsed).unwrap();
    assert_eq!(once, twice);

    let semantic = &report.valid_semantics[0];
    let once = serde_json::to_string(semantic).unwrap();
    let twice = serde_json::to_string(&serde_json::from_str::<septarchy::game::report::SemanticResult>(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn order_round_trips_through_json() {
    let order = Order {
        origin: RegionId::new("nth"),
        kind: OrderKind::SupportMove {
            support_origin: RegionId::new("pic"),
            support_destination: RegionId::new("bel"),
        },
    };
    let json = serde_json::to_string(&order).unwrap();
    let parsed: Order = serde_json::from_str(&json).unwrap();
    assert_eq!(order, parsed);
}

#[test]
fn army_move_to_non_adjacent_coast_without_convoy_is_no_convoy_not_bounced() {
    let rules = world_rules();
    let games_root = temp_games_root("no-convoy-boundary");
    let game_id = "g1";

    // lon and bel are not adjacent and no fleet offers a convoy, but a
    // sea path exists (lon-eng-bel) so the order is syntactically and
    // semantically legal; only resolution should fail it.
    let state = game_state(
        &rules,
        "1901-S-M",
        &["ENG"],
        vec![unit("ENG", UnitType::Army, 1, "lon")],
        &[("lon", "ENG")],
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(&games_root, game_id, &[("ENG", &["lon-bel"])]);

    game::process_turn(&games_root, &rules, game_id).unwrap();
    let report = report_for(&games_root, game_id, "1901-S-M");

    let result = report
        .resolution_results
        .iter()
        .find(|r| r.origin_territory == RegionId::new("lon"))
        .unwrap();
    assert_eq!(result.outcome, OutcomeType::MoveNoConvoy);
    assert_ne!(result.outcome, OutcomeType::MoveBounced);
}

#[test]
fn build_beyond_center_count_is_rejected() {
    let rules = world_rules();
    let games_root = temp_games_root("build-no-center");
    let game_id = "g1";

    let state = game_state(
        &rules,
        "1901-W-A",
        &["G"],
        vec![unit("G", UnitType::Army, 1, "wal")],
        &[("ber", "G")], // one unit, one center: no room to build
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(&games_root, game_id, &[("G", &["build army ber"])]);

    game::process_turn(&games_root, &rules, game_id).unwrap();
    let report = report_for(&games_root, game_id, "1901-W-A");

    let build = report
        .resolution_results
        .iter()
        .find(|r| r.origin_territory == RegionId::new("ber"))
        .unwrap();
    assert_eq!(build.outcome, OutcomeType::BuildNoCenter);
}

fn _unused_mode_import_anchor(_m: Mode) {}
