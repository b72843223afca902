//! The six literal end-to-end scenarios of the testable-properties section:
//! trivial move, head-to-head bounce, support-cut cascade into a retreat
//! standoff, a convoy disrupted by dislodging its convoyer, and winter
//! adjustment (including a duplicate build).

#[path = "./support.rs"]
mod support;

use septarchy::game::report::{OutcomeType, PhaseResolutionReport};
use septarchy::game::{self, GamesRoot};
use septarchy::geo::RegionId;
use septarchy::UnitType;

use support::*;

fn report_for(games_root: &GamesRoot, game_id: &str, turn_code: &str) -> PhaseResolutionReport {
    let code = turn_code.parse().unwrap();
    septarchy::game::io::load_json(&games_root.report_path(game_id, &code)).unwrap()
}

fn result_at<'a>(
    report: &'a PhaseResolutionReport,
    origin: &str,
) -> &'a septarchy::game::report::ResolutionResult {
    report
        .resolution_results
        .iter()
        .find(|r| r.origin_territory == RegionId::new(origin))
        .unwrap_or_else(|| panic!("no resolution result for origin {origin}"))
}

#[test]
fn trivial_move() {
    let rules = world_rules();
    let games_root = temp_games_root("trivial-move");
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

    let next = game::process_turn(&games_root, &rules, game_id).unwrap();

    assert_eq!(next.meta.turn_code, "1901-F-M");
    let unit_id = septarchy::UnitId::new(&septarchy::NationId::new("ENG"), UnitType::Army, 1);
    assert_eq!(next.units[&unit_id].territory_id, RegionId::new("wal"));

    let report = report_for(&games_root, game_id, "1901-S-M");
    let result = result_at(&report, "lon");
    assert_eq!(result.outcome, OutcomeType::MoveSuccess);
    assert_eq!(result.resolved_territory, RegionId::new("wal"));
}

#[test]
fn head_to_head_bounce() {
    let rules = world_rules();
    let games_root = temp_games_root("h2h-bounce");
    let game_id = "g1";

    let state = game_state(
        &rules,
        "1901-S-M",
        &["ENG", "FRA"],
        vec![
            unit("ENG", UnitType::Army, 1, "bel"),
            unit("FRA", UnitType::Army, 1, "pic"),
        ],
        &[("bel", "ENG"), ("pic", "FRA")],
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(
        &games_root,
        game_id,
        &[("ENG", &["bel-pic"]), ("FRA", &["pic-bel"])],
    );

    let next = game::process_turn(&games_root, &rules, game_id).unwrap();

    // Neither side was dislodged, so the Retreat phase is skipped entirely.
    assert_eq!(next.meta.turn_code, "1901-F-M");

    let report = report_for(&games_root, game_id, "1901-S-M");
    assert_eq!(result_at(&report, "bel").outcome, OutcomeType::MoveBounced);
    assert_eq!(result_at(&report, "pic").outcome, OutcomeType::MoveBounced);
    assert!(!report.any_dislodged());
}

#[test]
fn support_cut_cascade_then_retreat_standoff() {
    let rules = world_rules();
    let games_root = temp_games_root("cascade-standoff");
    let game_id = "g1";

    let state = game_state(
        &rules,
        "1901-S-M",
        &["P1", "P2"],
        vec![
            unit("P1", UnitType::Army, 1, "bel"),
            unit("P2", UnitType::Army, 1, "ruh"),
            unit("P2", UnitType::Army, 2, "pic"),
            unit("P1", UnitType::Army, 2, "bur"),
            unit("P1", UnitType::Army, 3, "mun"),
            unit("P2", UnitType::Fleet, 1, "nth"),
        ],
        &[("bel", "P1"), ("pic", "P2"), ("bur", "P1"), ("mun", "P1")],
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(
        &games_root,
        game_id,
        &[
            ("P2", &["pic-bel", "ruh hold", "nth s pic-bel"]),
            ("P1", &["bur-ruh", "bel hold", "mun s bur-ruh"]),
        ],
    );

    let movement_result = game::process_turn(&games_root, &rules, game_id).unwrap();
    assert_eq!(movement_result.meta.turn_code, "1901-S-R");

    let movement_report = report_for(&games_root, game_id, "1901-S-M");
    let bel = result_at(&movement_report, "bel");
    assert_eq!(bel.outcome, OutcomeType::Dislodged);
    assert_eq!(
        bel.dislodged_by_id.as_ref().unwrap().as_str(),
        "p2_army_2" // the mover from pic
    );
    let ruh = result_at(&movement_report, "ruh");
    assert_eq!(ruh.outcome, OutcomeType::Dislodged);
    assert_eq!(
        ruh.dislodged_by_id.as_ref().unwrap().as_str(),
        "p1_army_2" // the mover from bur
    );

    // Continuing (3): both dislodged units retreat into the same empty
    // tile and so both are destroyed (standoff).
    write_orders(
        &games_root,
        game_id,
        &[("P1", &["bel-hol"]), ("P2", &["ruh-hol"])],
    );
    let retreat_result = game::process_turn(&games_root, &rules, game_id).unwrap();
    assert_eq!(retreat_result.meta.turn_code, "1901-F-M");

    let retreat_report = report_for(&games_root, game_id, "1901-S-R");
    assert_eq!(retreat_report.resolution_results.len(), 2);
    for result in &retreat_report.resolution_results {
        assert_eq!(result.outcome, OutcomeType::RetreatFailed);
    }

    let p1_unit = septarchy::UnitId::new(&septarchy::NationId::new("P1"), UnitType::Army, 1);
    let p2_unit = septarchy::UnitId::new(&septarchy::NationId::new("P2"), UnitType::Army, 1);
    assert!(!retreat_result.units.contains_key(&p1_unit));
    assert!(!retreat_result.units.contains_key(&p2_unit));
}

#[test]
fn convoy_disrupted_by_dislodged_convoyer() {
    let rules = world_rules();
    let games_root = temp_games_root("convoy-disrupted");
    let game_id = "g1";

    let state = game_state(
        &rules,
        "1901-S-M",
        &["ENG", "FRA"],
        vec![
            unit("ENG", UnitType::Army, 1, "lon"),
            unit("ENG", UnitType::Fleet, 1, "eng"),
            unit("ENG", UnitType::Army, 2, "bel"),
            unit("FRA", UnitType::Fleet, 1, "bre"),
            unit("FRA", UnitType::Army, 1, "pic"),
            unit("FRA", UnitType::Fleet, 2, "mao"),
        ],
        &[("bel", "ENG"), ("bre", "FRA")],
    );
    state.save(&games_root, game_id).unwrap();
    write_orders(
        &games_root,
        game_id,
        &[
            ("ENG", &["lon-bel", "eng c lon-bel", "bel s pic"]),
            ("FRA", &["bre-eng", "pic hold", "mao s bre-eng"]),
        ],
    );

    game::process_turn(&games_root, &rules, game_id).unwrap();
    let report = report_for(&games_root, game_id, "1901-S-M");

    let eng_fleet = result_at(&report, "eng");
    assert_eq!(eng_fleet.outcome, OutcomeType::Dislodged);
    assert_eq!(eng_fleet.strength, 1);

    let lon_army = result_at(&report, "lon");
    assert_eq!(lon_army.outcome, OutcomeType::MoveNoConvoy);

    let bel_support = result_at(&report, "bel");
    assert_eq!(bel_support.outcome, OutcomeType::SupportSuccess);

    let pic_hold = result_at(&report, "pic");
    assert_eq!(pic_hold.outcome, OutcomeType::HoldSuccess);
}

#[test]
fn winter_build_success() {
    let rules = world_rules();
    let games_root = temp_games_root("winter-build");
    let game_id = "g1";

    let mut state = game_state(
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
    state.meta.counters.insert("G_army".to_string(), 5);
    state.save(&games_root, game_id).unwrap();
    write_orders(&games_root, game_id, &[("G", &["build army ber"])]);

    let next = game::process_turn(&games_root, &rules, game_id).unwrap();
    assert_eq!(next.meta.turn_code, "1902-S-M");

    let report = report_for(&games_root, game_id, "1901-W-A");
    let build = result_at(&report, "ber");
    assert_eq!(build.outcome, OutcomeType::BuildSuccess);
    let built_id = build.unit_id.as_ref().unwrap();
    assert_eq!(built_id.as_str(), "g_army_6");
    assert!(next.units.contains_key(built_id));

    assert_eq!(next.units_of(&septarchy::NationId::new("G")).count(), 4);
    assert_eq!(
        next.supply_centers_of(&septarchy::NationId::new("G")).count(),
        4
    );
}

#[test]
fn winter_build_duplicate_order_folds_onto_first() {
    let rules = world_rules();
    let games_root = temp_games_root("winter-build-dup");
    let game_id = "g1";

    let mut state = game_state(
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
    state.meta.counters.insert("G_army".to_string(), 5);
    state.save(&games_root, game_id).unwrap();
    write_orders(
        &games_root,
        game_id,
        &[("G", &["build army ber", "build fleet ber"])],
    );

    game::process_turn(&games_root, &rules, game_id).unwrap();
    let report = report_for(&games_root, game_id, "1901-W-A");

    assert_eq!(report.resolution_results.len(), 1);
    let build = result_at(&report, "ber");
    assert_eq!(build.outcome, OutcomeType::BuildSuccess);
    assert_eq!(build.duplicate_orders.len(), 1);
}
