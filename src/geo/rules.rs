use std::collections::{HashSet, HashMap, VecDeque};

use crate::geo::{Border, Mode, Region, RegionId, Terrain};
use crate::nation::NationId;

/// Immutable map geometry: regions, coasts, typed adjacency edges, supply
/// centers, home centers, display names. Loaded once per game (see
/// [`crate::game::variant`]) and shared read-only for its lifetime; every
/// method here is pure.
#[derive(Debug, Clone)]
pub struct Rules {
    pub(crate) regions: HashMap<RegionId, Region>,
    pub(crate) edges: HashSet<(RegionId, RegionId, Mode)>,
    pub(crate) adjacency: HashMap<RegionId, Vec<Border>>,
    pub(crate) home_centers: HashMap<NationId, HashSet<RegionId>>,
}

impl Rules {
    pub fn regions(&self) -> impl Iterator<Item = &RegionId> {
        self.regions.keys()
    }

    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn is_supply_center(&self, id: &RegionId) -> bool {
        self.regions.get(id).map_or(false, |r| r.is_supply_center)
    }

    pub fn is_home_of(&self, nation: &NationId, id: &RegionId) -> bool {
        self.home_centers
            .get(nation)
            .map_or(false, |centers| centers.contains(id))
    }

    pub fn type_of(&self, id: &RegionId) -> Option<Terrain> {
        self.regions.get(id).map(|r| r.terrain)
    }

    pub fn display_name(&self, id: &RegionId) -> Option<&str> {
        self.regions.get(id).map(|r| r.display_name.as_str())
    }

    pub fn has_coast(&self, id: &RegionId) -> bool {
        self.regions
            .values()
            .any(|r| r.parent.as_ref() == Some(id))
    }

    pub fn coasts_of(&self, id: &RegionId) -> Vec<&RegionId> {
        self.regions
            .values()
            .filter(|r| r.parent.as_ref() == Some(id))
            .map(|r| &r.id)
            .collect()
    }

    pub fn parent_of(&self, coast: &RegionId) -> Option<&RegionId> {
        self.regions.get(coast).and_then(|r| r.parent.as_ref())
    }

    /// The id occupancy is tracked under: a coast node's parent region, or
    /// the region itself.
    pub fn occupancy_key(&self, id: &RegionId) -> RegionId {
        self.regions
            .get(id)
            .and_then(|r| r.parent.clone())
            .unwrap_or_else(|| id.clone())
    }

    pub fn adjacent(&self, id: &RegionId) -> &[Border] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edges(&self) -> &HashSet<(RegionId, RegionId, Mode)> {
        &self.edges
    }

    pub fn home_centers_of(&self, nation: &NationId) -> HashSet<&RegionId> {
        self.home_centers
            .get(nation)
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    pub fn is_adjacent(&self, from: &RegionId, to: &RegionId, unit_type: crate::UnitType) -> bool {
        self.adjacent(from)
            .iter()
            .any(|b| &b.to == to && b.is_passable_by(unit_type))
    }

    /// Breadth-first search for a chain of fleet-traversable (sea or coast)
    /// nodes connecting `from` to `to`, ignoring which fleets actually sit on
    /// those nodes. Used by the syntax-adjacent semantic checks of §4.3
    /// ("a sea-path exists"); the resolver's convoy-path discovery (§4.4a)
    /// additionally requires a live, undislodged convoying fleet on each
    /// node and is implemented separately in `judge::convoy`.
    pub fn fleet_path_exists(&self, from: &RegionId, to: &RegionId) -> bool {
        if from == to {
            return true;
        }
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        queue.push_back(from.clone());
        seen.insert(from.clone());
        while let Some(current) = queue.pop_front() {
            for border in self.adjacent(&current) {
                if !matches!(border.mode, Mode::Sea | Mode::Both) {
                    continue;
                }
                if &border.to == to {
                    return true;
                }
                if seen.insert(border.to.clone()) {
                    queue.push_back(border.to.clone());
                }
            }
        }
        false
    }
}
