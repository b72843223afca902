use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::RegionId;
use crate::nation::NationId;
use crate::ShortName;

/// The two unit types in play. Armies hold land and coasts; fleets hold sea
/// and coasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Army,
    Fleet,
}

impl UnitType {
    fn tag(self) -> &'static str {
        match self {
            UnitType::Army => "army",
            UnitType::Fleet => "fleet",
        }
    }
}

impl FromStr for UnitType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "army" | "a" => Ok(UnitType::Army),
            "fleet" | "f" => Ok(UnitType::Fleet),
            _ => Err(()),
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl ShortName for UnitType {
    fn short_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(match self {
            UnitType::Army => "A",
            UnitType::Fleet => "F",
        })
    }
}

/// A synthesized, never-reused unit identifier of the shape
/// `<owner>_<type>_<counter>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(owner: &NationId, unit_type: UnitType, counter: u32) -> Self {
        UnitId(format!(
            "{}_{}_{}",
            owner.as_str().to_lowercase(),
            unit_type.tag(),
            counter
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the monotonic counter suffix back out of the id, or `None`
    /// if the id does not have the expected `<owner>_<type>_<counter>` shape.
    pub fn counter(&self) -> Option<u32> {
        self.0.rsplit('_').next()?.parse().ok()
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit on the board: who owns it, what kind it is, and where it stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub owner_id: NationId,
    pub territory_id: RegionId,
}

impl ShortName for Unit {
    fn short_name(&self) -> Cow<'_, str> {
        Cow::Owned(format!(
            "{} {}",
            self.unit_type.short_name(),
            self.territory_id.as_str()
        ))
    }
}
