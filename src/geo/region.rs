use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ShortName;

/// A region identifier. Plain regions look like `"lon"`; a coast node on a
/// region with named coasts looks like `"stp_sc"` (folded from the
/// player-facing `stp/sc`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        RegionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The province this region belongs to: itself for a plain region or a
    /// parent land region, or the leading component before `_` for a coast id
    /// that was constructed without a registered parent link.
    pub fn province_prefix(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        RegionId::new(s)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ShortName for RegionId {
    fn short_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

/// The kind of space a region occupies on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Land,
    Sea,
    Coast,
}

/// The traversal mode of an edge between two regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Land,
    Sea,
    Both,
}

impl Mode {
    pub fn allows(self, unit_type: crate::UnitType) -> bool {
        match self {
            Mode::Both => true,
            Mode::Land => unit_type == crate::UnitType::Army,
            Mode::Sea => unit_type == crate::UnitType::Fleet,
        }
    }
}

/// One adjudication space: a land region, a sea region, or a coast node of a
/// multi-coast land region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub display_name: String,
    pub terrain: Terrain,
    pub is_supply_center: bool,
    /// The nation whose home center this is, if any.
    pub home_center_of: Option<crate::nation::NationId>,
    /// Set for a coast node: the parent land region it shares occupancy with.
    pub parent: Option<RegionId>,
}

impl Region {
    /// The id that occupancy is tracked under: a coast node's parent, or
    /// itself for anything else.
    pub fn occupancy_key(&self) -> &RegionId {
        self.parent.as_ref().unwrap_or(&self.id)
    }
}
