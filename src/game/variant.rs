//! Loads read-only variant data (§6) into a [`Rules`] value and an initial
//! [`GameState`]. Grounded directly on the original's `rules_loader.py`:
//! this module reproduces its algorithm field-for-field (building
//! `territory_ids`, `supply_centers`, `parent_territory`, `home_centers`,
//! and a symmetrized `edges` set), adapted to populate a [`RulesBuilder`]
//! instead of the original's flat dataclass.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::game::error::StructuralError;
use crate::game::io::load_json;
use crate::game::state::{GameMeta, GameState, GameStatus};
use crate::geo::builder::RulesBuilder;
use crate::geo::{Mode, Region, RegionId, Rules, Terrain};
use crate::nation::{Nation, NationId, NationStatus};
use crate::time::TurnCode;
use crate::unit::{Unit, UnitId, UnitType};

#[derive(Debug, Deserialize)]
struct TerritoryRecord {
    display_name: String,
    #[serde(rename = "type")]
    terrain: Terrain,
    #[serde(default)]
    is_supply_center: bool,
    #[serde(default)]
    home_country: Option<String>,
    #[serde(default)]
    coasts: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    mode: Mode,
}

#[derive(Debug, Deserialize)]
struct NationRecord {
    id: String,
    #[allow(dead_code)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct StartingUnitRecord {
    owner_id: String,
    unit_type: UnitType,
    territory_id: String,
}

#[derive(Debug, Deserialize)]
struct StartingPlayerRecord {
    nation_id: String,
}

fn file_err(path: &Path, reason: impl Into<String>) -> StructuralError {
    StructuralError::InvalidVariantData {
        file: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Loads `world/territories.json`, `world/edges.json`, and
/// `world/nations.json` into an immutable [`Rules`] value.
pub fn load_rules(variant_root: &Path) -> Result<Rules, StructuralError> {
    let territories_path = variant_root.join("world").join("territories.json");
    let territories: HashMap<String, TerritoryRecord> = load_json(&territories_path)?;

    let edges_path = variant_root.join("world").join("edges.json");
    let edges: Vec<EdgeRecord> = load_json(&edges_path)?;

    let nations_path = variant_root.join("world").join("nations.json");
    let _nations: Vec<NationRecord> = load_json(&nations_path)?;

    let mut builder = RulesBuilder::new();
    for (id, record) in &territories {
        let region_id = RegionId::new(id.as_str());
        builder.add_region(Region {
            id: region_id.clone(),
            display_name: record.display_name.clone(),
            terrain: record.terrain,
            is_supply_center: record.is_supply_center,
            home_center_of: record.home_country.as_deref().map(NationId::new),
            parent: None,
        });

        for side in &record.coasts {
            let coast_id = RegionId::new(format!("{id}_{side}"));
            builder.add_region(Region {
                id: coast_id,
                display_name: format!("{} ({side})", record.display_name),
                terrain: Terrain::Coast,
                is_supply_center: false,
                home_center_of: None,
                parent: Some(region_id.clone()),
            });
        }
    }

    for edge in &edges {
        builder.add_edge(
            RegionId::new(edge.from.as_str()),
            RegionId::new(edge.to.as_str()),
            edge.mode,
        );
    }

    builder
        .build()
        .map_err(|e| file_err(&edges_path, e.to_string()))
}

/// Loads `start/starting_units.json`, `start/starting_ownerships.json`, and
/// `start/starting_players.json` into a fresh [`GameState`], allocating unit
/// ids via a zeroed counter table (§3: ids are `<owner>_<type>_<counter>`).
/// Also loads `world/*.json` via [`load_rules`], needed only to fold
/// starting-unit coasts into `GameState`'s occupancy-keyed index.
pub fn load_initial_state(
    variant_root: &Path,
    game_id: &str,
    variant_name: &str,
) -> Result<GameState, StructuralError> {
    let rules = load_rules(variant_root)?;

    let players_path = variant_root.join("start").join("starting_players.json");
    let player_records: Vec<StartingPlayerRecord> = load_json(&players_path)?;
    let players: HashMap<NationId, Nation> = player_records
        .into_iter()
        .map(|p| {
            let id = NationId::new(p.nation_id);
            (
                id.clone(),
                Nation {
                    nation_id: id,
                    status: NationStatus::Active,
                },
            )
        })
        .collect();

    let ownerships_path = variant_root.join("start").join("starting_ownerships.json");
    let ownership_records: HashMap<String, String> = load_json(&ownerships_path)?;
    let territory_state: HashMap<RegionId, NationId> = ownership_records
        .into_iter()
        .map(|(region, owner)| (RegionId::new(region), NationId::new(owner)))
        .collect();

    let units_path = variant_root.join("start").join("starting_units.json");
    let unit_records: Vec<StartingUnitRecord> = load_json(&units_path)?;

    let mut meta = GameMeta {
        game_id: game_id.to_string(),
        variant: variant_name.to_string(),
        turn_code: TurnCode::initial().to_string(),
        status: GameStatus::Active,
        counters: HashMap::new(),
    };

    let mut units = HashMap::new();
    for record in unit_records {
        let owner = NationId::new(record.owner_id);
        let counter_key = format!("{}_{}", owner.as_str(), record.unit_type);
        let next = meta.counters.get(&counter_key).copied().unwrap_or(0) + 1;
        meta.counters.insert(counter_key, next);
        let id = UnitId::new(&owner, record.unit_type, next);
        units.insert(
            id.clone(),
            Unit {
                id,
                unit_type: record.unit_type,
                owner_id: owner,
                territory_id: RegionId::new(record.territory_id),
            },
        );
    }

    Ok(GameState::new(meta, players, units, territory_state, &rules))
}
