//! The in-memory world snapshot a `process_turn` call loads, mutates, and
//! persists. Grounded on the original's `LoadedState`
//! (`validator/orchestrator.py`), which bundles the on-disk `game.json` /
//! `players.json` / `units.json` / `territory_state.json` records plus a
//! derived `territory_to_unit` index and the pending Movement report.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::error::StructuralError;
use crate::game::io::{load_json, save_json, GamesRoot};
use crate::geo::{RegionId, Rules};
use crate::nation::{Nation, NationId};
use crate::time::TurnCode;
use crate::unit::{Unit, UnitId, UnitType};

/// `game.json`. The counters map is not named in §6's external-interface
/// listing (which documents the wire layout other collaborators read), but
/// must be persisted somewhere for the counter-monotonicity invariant (§3,
/// §8) to survive a game in which every unit of a given `(owner, type)` is
/// later destroyed — see DESIGN.md.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMeta {
    pub game_id: String,
    pub variant: String,
    pub turn_code: String,
    pub status: GameStatus,
    #[serde(default)]
    pub counters: HashMap<String, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Completed,
}

fn counter_key(owner: &NationId, unit_type: UnitType) -> String {
    format!("{}_{}", owner.as_str(), unit_type)
}

/// The full world snapshot for one game, with the unit table as the single
/// source of truth and `territory_to_unit` rebuilt from it on load rather
/// than persisted (Design Notes, §9).
#[derive(Debug, Clone)]
pub struct GameState {
    pub meta: GameMeta,
    pub players: HashMap<NationId, Nation>,
    pub units: HashMap<UnitId, Unit>,
    /// Supply-center ownership, tracked only for regions that have ever
    /// been Fall-occupied (§3).
    pub territory_state: HashMap<RegionId, NationId>,
    pub territory_to_unit: HashMap<RegionId, UnitId>,
}

impl GameState {
    /// `territory_to_unit` is keyed by occupancy space (§3: a coast node
    /// and its parent are the same space for occupancy), never by the
    /// exact coast id a unit's `territory_id` may carry.
    pub fn new(
        meta: GameMeta,
        players: HashMap<NationId, Nation>,
        units: HashMap<UnitId, Unit>,
        territory_state: HashMap<RegionId, NationId>,
        rules: &Rules,
    ) -> Self {
        let territory_to_unit = units
            .values()
            .map(|u| (rules.occupancy_key(&u.territory_id), u.id.clone()))
            .collect();
        GameState {
            meta,
            players,
            units,
            territory_state,
            territory_to_unit,
        }
    }

    pub fn turn_code(&self) -> Result<TurnCode, crate::game::error::StructuralError> {
        self.meta
            .turn_code
            .parse()
            .map_err(|_| crate::game::error::StructuralError::InvalidTurnCode(self.meta.turn_code.clone()))
    }

    pub fn set_turn_code(&mut self, turn_code: TurnCode) {
        self.meta.turn_code = turn_code.to_string();
    }

    /// Allocates the next counter for `(owner, unit_type)` and records the
    /// bump; counters never decrease (§3 invariant).
    pub fn next_counter(&mut self, owner: &NationId, unit_type: UnitType) -> u32 {
        let key = counter_key(owner, unit_type);
        let next = self.meta.counters.get(&key).copied().unwrap_or(0) + 1;
        self.meta.counters.insert(key, next);
        next
    }

    pub fn insert_unit(&mut self, unit: Unit, rules: &Rules) {
        self.territory_to_unit
            .insert(rules.occupancy_key(&unit.territory_id), unit.id.clone());
        self.units.insert(unit.id.clone(), unit);
    }

    /// Removes a unit from both the unit table and the derived index. The
    /// index entry is only evicted if it still points at this unit — by
    /// the time a dislodged/failed-retreat unit is removed, a deferred
    /// mover may have already claimed that same occupancy key, and
    /// removing unconditionally would evict the new occupant's entry
    /// instead of a stale one.
    pub fn remove_unit(&mut self, unit_id: &UnitId, rules: &Rules) {
        if let Some(unit) = self.units.remove(unit_id) {
            let key = rules.occupancy_key(&unit.territory_id);
            if self.territory_to_unit.get(&key) == Some(unit_id) {
                self.territory_to_unit.remove(&key);
            }
        }
    }

    /// Moves a still-live unit to `new_territory`, updating the derived
    /// index the same way `remove_unit` guards it: the old key is only
    /// cleared if it still names this unit (see `remove_unit`).
    pub fn relocate_unit(&mut self, unit_id: &UnitId, new_territory: RegionId, rules: &Rules) {
        let Some(unit) = self.units.get_mut(unit_id) else {
            return;
        };
        if unit.territory_id == new_territory {
            return;
        }
        let old_key = rules.occupancy_key(&unit.territory_id);
        unit.territory_id = new_territory;
        let new_key = rules.occupancy_key(&unit.territory_id);
        if self.territory_to_unit.get(&old_key) == Some(unit_id) {
            self.territory_to_unit.remove(&old_key);
        }
        self.territory_to_unit.insert(new_key, unit_id.clone());
    }

    pub fn unit_at(&self, territory: &RegionId, rules: &Rules) -> Option<&Unit> {
        self.territory_to_unit
            .get(&rules.occupancy_key(territory))
            .and_then(|id| self.units.get(id))
    }

    pub fn units_of(&self, nation: &NationId) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| &u.owner_id == nation)
    }

    pub fn supply_centers_of<'a>(
        &'a self,
        nation: &'a NationId,
    ) -> impl Iterator<Item = &'a RegionId> {
        self.territory_state
            .iter()
            .filter(move |(_, owner)| *owner == nation)
            .map(|(region, _)| region)
    }

    /// Loads the four per-game JSON files (§6) and rebuilds the derived
    /// `territory_to_unit` index from the unit table, which is always the
    /// single source of truth (Design Notes, §9).
    pub fn load(games_root: &GamesRoot, game_id: &str, rules: &Rules) -> Result<GameState, StructuralError> {
        let meta: GameMeta = load_json(&games_root.game_meta_path(game_id))?;
        let players: HashMap<NationId, Nation> = load_json(&games_root.players_path(game_id))?;
        let units: HashMap<UnitId, Unit> = load_json(&games_root.units_path(game_id))?;
        let territory_records: HashMap<RegionId, TerritoryStateRecord> =
            load_json(&games_root.territory_state_path(game_id))?;
        let territory_state = territory_records
            .into_iter()
            .map(|(region, record)| (region, record.owner_id))
            .collect();
        Ok(GameState::new(meta, players, units, territory_state, rules))
    }

    /// Persists the four per-game JSON files (§6). No file is touched until
    /// resolution has already succeeded (§7: "no partial writes").
    pub fn save(&self, games_root: &GamesRoot, game_id: &str) -> Result<(), StructuralError> {
        save_json(&games_root.game_meta_path(game_id), &self.meta)?;
        save_json(&games_root.players_path(game_id), &self.players)?;
        save_json(&games_root.units_path(game_id), &self.units)?;
        let territory_records: HashMap<&RegionId, TerritoryStateRecord> = self
            .territory_state
            .iter()
            .map(|(region, owner)| {
                (
                    region,
                    TerritoryStateRecord {
                        territory_id: region.clone(),
                        owner_id: owner.clone(),
                    },
                )
            })
            .collect();
        save_json(
            &games_root.territory_state_path(game_id),
            &territory_records,
        )
    }
}

/// The wire shape of one `territory_state.json` value: `{territory_id,
/// owner_id}` (§6), kept distinct from the simpler in-memory
/// `RegionId -> NationId` map so the persisted file carries the redundant
/// `territory_id` the external layout specifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TerritoryStateRecord {
    territory_id: RegionId,
    owner_id: NationId,
}
