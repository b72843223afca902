use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ShortName;

/// A stable identifier for a nation, e.g. `"ENG"` or `"P1"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationId(String);

impl NationId {
    pub fn new(id: impl Into<String>) -> Self {
        NationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NationId {
    fn from(s: &str) -> Self {
        NationId::new(s)
    }
}

impl From<String> for NationId {
    fn from(s: String) -> Self {
        NationId(s)
    }
}

impl fmt::Display for NationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ShortName for NationId {
    fn short_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

/// Whether a nation is still playing or has been knocked out of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NationStatus {
    Active,
    Eliminated,
}

/// A single player in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nation {
    pub nation_id: NationId,
    pub status: NationStatus,
}

impl Nation {
    pub fn new(nation_id: NationId) -> Self {
        Nation {
            nation_id,
            status: NationStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == NationStatus::Active
    }
}
