//! §4.4(a): convoy path discovery. For each Move ordered by an army to a
//! non-adjacent coast, enumerates the matching, live, non-invalidated
//! Convoy orders and breadth-first-searches their fleets' sea nodes for a
//! chain linking the army's origin to its destination.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::geo::{Mode, RegionId, Rules};
use crate::judge::soa::ResolutionSoA;
use crate::order::OrderKind;
use crate::UnitType;

/// Runs path discovery for every Move slot, setting `move_no_convoy` for
/// moves that cannot reach their destination by the existing convoy orders
/// and recording a path for those that can. Mutating a prior pass's
/// assumption here can only ever downgrade a move (clear a path it no
/// longer finds), which is what keeps the outer fixed-point loop monotone.
/// A Convoy order is invalid if no army's Move order actually names a
/// matching `(convoy_origin, convoy_destination)` pair — a convoy offered
/// for a move nobody made never applies.
pub fn mark_invalid_convoy(soa: &mut ResolutionSoA) {
    let moves: Vec<(RegionId, RegionId)> = (0..soa.len())
        .filter_map(|i| match &soa.order[i] {
            OrderKind::Move { destination } if soa.unit_type[i] == UnitType::Army => {
                Some((soa.orig_territory[i].clone(), destination.clone()))
            }
            _ => None,
        })
        .collect();

    for i in 0..soa.len() {
        if let OrderKind::Convoy {
            convoy_origin,
            convoy_destination,
        } = &soa.order[i]
        {
            soa.invalid_convoy[i] = !moves
                .iter()
                .any(|(origin, destination)| origin == convoy_origin && destination == convoy_destination);
        }
    }
}

pub fn discover_paths(soa: &mut ResolutionSoA, rules: &Rules) {
    let convoy_slots: Vec<usize> = (0..soa.len())
        .filter(|&i| {
            matches!(soa.order[i], OrderKind::Convoy { .. })
                && !soa.dislodged[i]
                && !soa.invalid_convoy[i]
        })
        .collect();

    for i in 0..soa.len() {
        if soa.unit_type[i] == UnitType::Fleet {
            // Fleets never convoy (§4.4b); leave their `move_no_convoy`
            // untouched for `set_provisional_destinations` to judge by
            // plain adjacency.
            continue;
        }
        let (destination, origin) = match &soa.order[i] {
            OrderKind::Move { destination } => (destination.clone(), soa.orig_territory[i].clone()),
            _ => continue,
        };

        if rules.is_adjacent(&origin, &destination, soa.unit_type[i]) {
            // Directly adjacent moves never need a convoy path.
            soa.move_no_convoy[i] = false;
            continue;
        }

        let fleet_positions: HashSet<RegionId> = convoy_slots
            .iter()
            .filter(|&&j| match &soa.order[j] {
                OrderKind::Convoy {
                    convoy_origin,
                    convoy_destination,
                } => convoy_origin == &origin && convoy_destination == &destination,
                _ => false,
            })
            .map(|&j| soa.orig_territory[j].clone())
            .collect();

        match bfs_convoy_path(&origin, &destination, &fleet_positions, rules) {
            Some(path) => {
                soa.move_no_convoy[i] = false;
                soa.set_convoy_path(i, path);
            }
            None => {
                soa.move_no_convoy[i] = true;
            }
        }
    }
}

fn bfs_convoy_path(
    origin: &RegionId,
    destination: &RegionId,
    fleet_positions: &HashSet<RegionId>,
    rules: &Rules,
) -> Option<Vec<RegionId>> {
    if fleet_positions.is_empty() {
        return None;
    }

    let mut queue = VecDeque::new();
    let mut came_from: HashMap<RegionId, RegionId> = HashMap::new();
    let mut visited: HashSet<RegionId> = HashSet::new();
    queue.push_back(origin.clone());
    visited.insert(origin.clone());

    while let Some(current) = queue.pop_front() {
        for border in rules.adjacent(&current) {
            if !matches!(border.mode, Mode::Sea | Mode::Both) {
                continue;
            }
            // The final leg, from the last convoying fleet to the
            // destination, does not itself need to be a fleet node.
            if &current != origin && fleet_positions.contains(&current) && &border.to == destination {
                return Some(reconstruct(&came_from, origin, &current));
            }
            if fleet_positions.contains(&border.to) && visited.insert(border.to.clone()) {
                came_from.insert(border.to.clone(), current.clone());
                queue.push_back(border.to.clone());
            }
        }
    }
    None
}

fn reconstruct(
    came_from: &HashMap<RegionId, RegionId>,
    origin: &RegionId,
    last: &RegionId,
) -> Vec<RegionId> {
    let mut path = vec![last.clone()];
    let mut node = last.clone();
    while let Some(prev) = came_from.get(&node) {
        if prev == origin {
            break;
        }
        path.push(prev.clone());
        node = prev.clone();
    }
    path.reverse();
    path
}
