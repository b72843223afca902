//! The structure-of-arrays representation the fixed-point resolver operates
//! over (§4.4 "Representation"). One `ResolutionSoA` holds every live unit's
//! working state for a Movement-phase resolution, indexed by slot `i`.
//! Mirrors the original's `resolution_soa.unit_id[i]` / `.new_territory[j]`
//! indexing (`validator/orchestrator.py::process_phase`) field-for-field.

use std::collections::HashMap;

use crate::game::report::OutcomeType;
use crate::geo::{RegionId, Rules};
use crate::nation::NationId;
use crate::order::OrderKind;
use crate::unit::{UnitId, UnitType};

/// A structure of arrays, one entry per live unit, carrying its chosen
/// order and the working state the fixed-point passes of §4.4 mutate.
pub struct ResolutionSoA {
    pub unit_id: Vec<UnitId>,
    pub owner_id: Vec<NationId>,
    pub unit_type: Vec<UnitType>,
    pub orig_territory: Vec<RegionId>,
    pub order: Vec<OrderKind>,

    pub new_territory: Vec<RegionId>,
    pub strength: Vec<u8>,
    pub dislodged: Vec<bool>,
    pub support_cut: Vec<bool>,
    pub move_no_convoy: Vec<bool>,
    pub invalid_support: Vec<bool>,
    pub invalid_convoy: Vec<bool>,

    /// Flat convoy-path buffer (Design Notes, §9): `path_flat[path_start[i]
    /// .. path_start[i] + path_len[i]]` is slot `i`'s discovered convoy
    /// chain of fleet-occupied sea/coast nodes, in traversal order.
    pub path_start: Vec<usize>,
    pub path_len: Vec<usize>,
    pub path_flat: Vec<RegionId>,

    pub outcome: Vec<Option<OutcomeType>>,
}

impl ResolutionSoA {
    pub fn len(&self) -> usize {
        self.unit_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unit_id.is_empty()
    }

    /// `origin region -> slot` index, keyed by occupancy space (§3: a coast
    /// node and its parent are the same space) rather than the exact coast
    /// id a unit happens to sit on.
    pub fn origin_index(&self, rules: &Rules) -> HashMap<RegionId, usize> {
        self.orig_territory
            .iter()
            .enumerate()
            .map(|(i, r)| (rules.occupancy_key(r), i))
            .collect()
    }

    /// `current new_territory -> [slots]` index, rebuilt fresh each pass
    /// rather than incrementally maintained (simplicity over micro-
    /// optimization, per Design Notes' bounded-loop guidance), keyed by
    /// occupancy space for the same reason as `origin_index`.
    pub fn destination_index(&self, rules: &Rules) -> HashMap<RegionId, Vec<usize>> {
        let mut map: HashMap<RegionId, Vec<usize>> = HashMap::new();
        for (i, r) in self.new_territory.iter().enumerate() {
            map.entry(rules.occupancy_key(r)).or_default().push(i);
        }
        map
    }

    pub fn convoy_path(&self, slot: usize) -> &[RegionId] {
        let start = self.path_start[slot];
        let len = self.path_len[slot];
        &self.path_flat[start..start + len]
    }

    pub fn set_convoy_path(&mut self, slot: usize, path: Vec<RegionId>) {
        self.path_start[slot] = self.path_flat.len();
        self.path_len[slot] = path.len();
        self.path_flat.extend(path);
    }
}
