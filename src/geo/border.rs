use crate::geo::{Mode, RegionId};
use crate::UnitType;

/// A directed adjacency between two regions. Edges are always inserted in
/// both directions by the builder, so `borders_of(r)` sees every neighbor of
/// `r` regardless of which direction the source data listed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Border {
    pub from: RegionId,
    pub to: RegionId,
    pub mode: Mode,
}

impl Border {
    pub fn is_passable_by(&self, unit_type: UnitType) -> bool {
        self.mode.allows(unit_type)
    }
}
