//! The order sum type (§3) and its wire form. Grounded on the teacher's
//! `MainCommand<L>`/`RetreatCommand<L>`/`BuildCommand` split
//! (`order/command/*.rs`), collapsed into one enum per §3 since this spec
//! does not parameterize orders over a generic location type the way the
//! teacher's `L` does — `RegionId` is always the location type here.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::geo::RegionId;
use crate::ShortName;
use crate::UnitType;

/// The kind of order, independent of its origin. Matches the
/// `order_type`-discriminated wire shape confirmed against
/// `original_source`'s `serialization.py` (`Order.order_type`,
/// `Order.destination`, `Order.convoy_origin`, `Order.convoy_destination`,
/// `Order.support_origin`, `Order.support_destination`, `Order.unit_type`),
/// flattened with [`Order::origin`] at serialization time via
/// `#[serde(flatten)]` so the two line up field-for-field with the original
/// persisted shape rather than a nested Rust-idiomatic enum encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "order_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Hold,
    Move {
        destination: RegionId,
    },
    SupportHold {
        support_origin: RegionId,
    },
    SupportMove {
        support_origin: RegionId,
        support_destination: RegionId,
    },
    Convoy {
        convoy_origin: RegionId,
        convoy_destination: RegionId,
    },
    Build {
        unit_type: UnitType,
    },
    Disband {
        unit_type: UnitType,
    },
    Retreat {
        destination: RegionId,
    },
}

/// A single declared order: the territory of the ordering unit (or the
/// build location) plus the kind of order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub origin: RegionId,
    #[serde(flatten)]
    pub kind: OrderKind,
}

impl Order {
    pub fn hold(origin: RegionId) -> Self {
        Order {
            origin,
            kind: OrderKind::Hold,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, OrderKind::Move { .. })
    }

    pub fn move_destination(&self) -> Option<&RegionId> {
        match &self.kind {
            OrderKind::Move { destination } | OrderKind::Retreat { destination } => {
                Some(destination)
            }
            _ => None,
        }
    }
}

impl ShortName for Order {
    fn short_name(&self) -> Cow<'_, str> {
        let body = match &self.kind {
            OrderKind::Hold => "hold".to_string(),
            OrderKind::Move { destination } => format!("- {}", destination.as_str()),
            OrderKind::SupportHold { support_origin } => {
                format!("s {}", support_origin.as_str())
            }
            OrderKind::SupportMove {
                support_origin,
                support_destination,
            } => format!(
                "s {} - {}",
                support_origin.as_str(),
                support_destination.as_str()
            ),
            OrderKind::Convoy {
                convoy_origin,
                convoy_destination,
            } => format!(
                "c {} - {}",
                convoy_origin.as_str(),
                convoy_destination.as_str()
            ),
            OrderKind::Build { unit_type } => format!("build {}", unit_type),
            OrderKind::Disband { unit_type } => format!("disband {}", unit_type),
            OrderKind::Retreat { destination } => format!("- {}", destination.as_str()),
        };
        Cow::Owned(format!("{} {}", self.origin.as_str(), body))
    }
}
