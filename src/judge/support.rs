//! §4.4(c): support cuts, and the one-time validity check for support
//! orders that name a unit or an order the supported unit never actually
//! gave.

use crate::geo::Rules;
use crate::judge::soa::ResolutionSoA;
use crate::order::OrderKind;

/// A `SupportHold` is invalid if no unit stands at its `support_origin`. A
/// `SupportMove` is invalid if no unit stands at its `support_origin`, or
/// that unit isn't actually ordered to move to the named
/// `support_destination` — the supporter must match the supported unit's
/// real order exactly, or the support simply never applies.
pub fn mark_invalid_support(soa: &mut ResolutionSoA, rules: &Rules) {
    let origin_index = soa.origin_index(rules);
    for i in 0..soa.len() {
        soa.invalid_support[i] = match &soa.order[i] {
            OrderKind::SupportHold { support_origin } => {
                !origin_index.contains_key(&rules.occupancy_key(support_origin))
            }
            OrderKind::SupportMove {
                support_origin,
                support_destination,
            } => match origin_index.get(&rules.occupancy_key(support_origin)) {
                None => true,
                Some(&j) => !matches!(
                    &soa.order[j],
                    OrderKind::Move { destination } if destination == support_destination
                ),
            },
            _ => false,
        };
    }
}

/// §4.4(c): a Support is cut iff some other unit is provisionally moving
/// into the supporter's origin, except:
/// - a mover flagged `MOVE_NO_CONVOY` never cuts;
/// - a mover coming *from* a SupportMove's `support_destination` does not
///   cut that support (a supported attacker cannot be cut by its victim);
/// - a unit never cuts its own support order.
pub fn compute_cuts(soa: &mut ResolutionSoA, rules: &Rules) {
    let dest_index = soa.destination_index(rules);
    for i in 0..soa.len() {
        let is_support = matches!(
            soa.order[i],
            OrderKind::SupportHold { .. } | OrderKind::SupportMove { .. }
        );
        if !is_support {
            continue;
        }

        let supporter_origin = rules.occupancy_key(&soa.orig_territory[i]);
        let victim_origin = match &soa.order[i] {
            OrderKind::SupportMove {
                support_destination,
                ..
            } => Some(rules.occupancy_key(support_destination)),
            _ => None,
        };

        let cut = dest_index
            .get(&supporter_origin)
            .into_iter()
            .flatten()
            .any(|&j| {
                j != i
                    && matches!(soa.order[j], OrderKind::Move { .. })
                    && !soa.move_no_convoy[j]
                    && victim_origin.as_ref() != Some(&rules.occupancy_key(&soa.orig_territory[j]))
            });
        soa.support_cut[i] = cut;
    }
}
