//! §4.4(e): destination conflict resolution, repeated to a fixed point
//! within one outer resolver pass. Reverting a bounced mover can free up a
//! tile another mover was contesting, so groups are recomputed every inner
//! iteration until nothing changes.

use crate::geo::Rules;
use crate::judge::soa::ResolutionSoA;

/// Resolves all destination contests. A lone highest-strength slot wins
/// its tile and every other contestant reverts to origin; a tie reverts
/// everyone (standoff). The one exception: a would-be winner is never
/// allowed to land on a same-owner unit that is staying put — that is
/// always treated as bounced, regardless of strength (self-dislodgement
/// is forbidden; see `(f)`). Destinations are grouped by occupancy space
/// (§3), so a fleet on a coast and an army moving to the parent province
/// contest the same tile.
pub fn resolve(soa: &mut ResolutionSoA, rules: &Rules) {
    loop {
        let groups = soa.destination_index(rules);
        let mut changed = false;

        for slots in groups.values() {
            if slots.len() <= 1 {
                continue;
            }

            let max_strength = slots.iter().map(|&i| soa.strength[i]).max().unwrap_or(0);
            let winners: Vec<usize> = slots
                .iter()
                .copied()
                .filter(|&i| soa.strength[i] == max_strength)
                .collect();

            let bounce_all = if winners.len() != 1 {
                true
            } else {
                let winner = winners[0];
                let winner_is_move = soa.new_territory[winner] != soa.orig_territory[winner];
                winner_is_move
                    && slots.iter().any(|&j| {
                        j != winner
                            && soa.new_territory[j] == soa.orig_territory[j]
                            && soa.owner_id[j] == soa.owner_id[winner]
                    })
            };

            if bounce_all {
                for &i in slots {
                    if soa.new_territory[i] != soa.orig_territory[i] {
                        soa.new_territory[i] = soa.orig_territory[i].clone();
                        changed = true;
                    }
                }
            } else {
                let winner = winners[0];
                for &i in slots {
                    if i != winner && soa.new_territory[i] != soa.orig_territory[i] {
                        soa.new_territory[i] = soa.orig_territory[i].clone();
                        changed = true;
                    }
                }
            }
        }

        if !changed {
            break;
        }
    }
}
