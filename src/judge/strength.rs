//! §4.4(d): strength computation. Every slot starts each pass at strength 1
//! (its own unit); each uncut, valid Support order that actually matches a
//! live unit's origin and order adds 1 to that unit's strength.

use crate::geo::Rules;
use crate::judge::soa::ResolutionSoA;
use crate::order::OrderKind;

pub fn compute_strength(soa: &mut ResolutionSoA, rules: &Rules) {
    for s in soa.strength.iter_mut() {
        *s = 1;
    }

    let origin_index = soa.origin_index(rules);
    for i in 0..soa.len() {
        if soa.support_cut[i] || soa.invalid_support[i] {
            continue;
        }
        let support_origin = match &soa.order[i] {
            OrderKind::SupportHold { support_origin } => support_origin,
            OrderKind::SupportMove { support_origin, .. } => support_origin,
            _ => continue,
        };
        if let Some(&target) = origin_index.get(&rules.occupancy_key(support_origin)) {
            soa.strength[target] = soa.strength[target].saturating_add(1);
        }
    }
}
