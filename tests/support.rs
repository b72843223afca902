//! Shared fixtures for the integration tests in this directory: a small
//! hand-built map covering every region named in the end-to-end scenarios,
//! plus thin helpers over the public `game`/`geo`/`unit` API for assembling
//! a `GameState` and driving it through a temporary `GamesRoot`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use septarchy::game::state::{GameMeta, GameState, GameStatus};
use septarchy::game::GamesRoot;
use septarchy::geo::builder::RulesBuilder;
use septarchy::geo::{Mode, Region, RegionId, Rules, Terrain};
use septarchy::{Nation, NationId, NationStatus, Unit, UnitId, UnitType};

/// A fragment of the classic map sized to exactly the regions the spec's
/// literal end-to-end scenarios (trivial move, head-to-head bounce,
/// support-cut cascade, retreat standoff, disrupted convoy, winter
/// adjustment) and the quantified-invariant tests need.
pub fn world_rules() -> Rules {
    let mut builder = RulesBuilder::new();

    let land = |id: &str, sc: bool, home: Option<&str>| Region {
        id: RegionId::new(id),
        display_name: id.to_string(),
        terrain: Terrain::Land,
        is_supply_center: sc,
        home_center_of: home.map(NationId::new),
        parent: None,
    };
    let coast = |id: &str, sc: bool, home: Option<&str>| Region {
        id: RegionId::new(id),
        display_name: id.to_string(),
        terrain: Terrain::Coast,
        is_supply_center: sc,
        home_center_of: home.map(NationId::new),
        parent: None,
    };
    let sea = |id: &str| Region {
        id: RegionId::new(id),
        display_name: id.to_string(),
        terrain: Terrain::Sea,
        is_supply_center: false,
        home_center_of: None,
        parent: None,
    };

    builder
        .add_region(coast("lon", true, Some("ENG")))
        .add_region(coast("wal", false, None))
        .add_region(coast("bel", true, None))
        .add_region(coast("pic", false, None))
        .add_region(land("ruh", false, None))
        .add_region(land("bur", false, None))
        .add_region(land("mun", true, None))
        .add_region(sea("nth"))
        .add_region(coast("hol", false, None))
        .add_region(sea("eng"))
        .add_region(coast("bre", true, Some("FRA")))
        .add_region(sea("mao"))
        .add_region(coast("ber", true, Some("G")));

    builder
        .add_edge(RegionId::new("lon"), RegionId::new("wal"), Mode::Land)
        .add_edge(RegionId::new("bel"), RegionId::new("pic"), Mode::Land)
        .add_edge(RegionId::new("bur"), RegionId::new("ruh"), Mode::Land)
        .add_edge(RegionId::new("nth"), RegionId::new("bel"), Mode::Both)
        .add_edge(RegionId::new("mun"), RegionId::new("ruh"), Mode::Land)
        .add_edge(RegionId::new("bel"), RegionId::new("hol"), Mode::Land)
        .add_edge(RegionId::new("ruh"), RegionId::new("hol"), Mode::Land)
        .add_edge(RegionId::new("lon"), RegionId::new("eng"), Mode::Both)
        .add_edge(RegionId::new("eng"), RegionId::new("bel"), Mode::Both)
        .add_edge(RegionId::new("bre"), RegionId::new("eng"), Mode::Both)
        .add_edge(RegionId::new("mao"), RegionId::new("eng"), Mode::Both);

    builder.build().expect("fixture map is internally consistent")
}

pub fn nation(id: &str) -> Nation {
    Nation {
        nation_id: NationId::new(id),
        status: NationStatus::Active,
    }
}

pub fn unit(owner: &str, unit_type: UnitType, counter: u32, territory: &str) -> Unit {
    let owner_id = NationId::new(owner);
    Unit {
        id: UnitId::new(&owner_id, unit_type, counter),
        unit_type,
        owner_id,
        territory_id: RegionId::new(territory),
    }
}

/// Builds a `GameState` from a flat list of units (deriving both the unit
/// table and the `counters` table from their ids) plus explicit
/// supply-center ownership.
pub fn game_state(
    rules: &Rules,
    turn_code: &str,
    players: &[&str],
    units: Vec<Unit>,
    owned_centers: &[(&str, &str)],
) -> GameState {
    let mut counters: HashMap<String, u32> = HashMap::new();
    for u in &units {
        let key = format!("{}_{}", u.owner_id.as_str(), u.unit_type);
        let counter = u.id.counter().expect("fixture unit ids always parse");
        let slot = counters.entry(key).or_insert(0);
        if counter > *slot {
            *slot = counter;
        }
    }

    let meta = GameMeta {
        game_id: "fixture".to_string(),
        variant: "fixture".to_string(),
        turn_code: turn_code.to_string(),
        status: GameStatus::Active,
        counters,
    };

    let players = players
        .iter()
        .map(|id| (NationId::new(*id), nation(id)))
        .collect();

    let units = units.into_iter().map(|u| (u.id.clone(), u)).collect();

    let territory_state = owned_centers
        .iter()
        .map(|(region, owner)| (RegionId::new(*region), NationId::new(*owner)))
        .collect();

    GameState::new(meta, players, units, territory_state, rules)
}

/// A games root under the system temp directory, unique per call so
/// concurrently-run tests never collide; left on disk for post-mortem
/// inspection (tests run in throwaway CI/dev environments).
pub fn temp_games_root(tag: &str) -> GamesRoot {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nonce = COUNTER.fetch_add(1, Ordering::Relaxed);
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut dir = PathBuf::from(std::env::temp_dir());
    dir.push(format!("septarchy-test-{tag}-{pid}-{nanos}-{nonce}"));
    GamesRoot::new(dir)
}

pub fn write_orders(games_root: &GamesRoot, game_id: &str, orders: &[(&str, &[&str])]) {
    let map: HashMap<NationId, Vec<String>> = orders
        .iter()
        .map(|(nation, raws)| {
            (
                NationId::new(*nation),
                raws.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect();
    septarchy::game::io::save_json(&games_root.orders_path(game_id), &map)
        .expect("writing a fixture orders.json never fails");
}
