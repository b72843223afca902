//! C2: the syntax parser (§4.2). Normalizes a raw order string and tokenizes
//! it into a typed [`Order`], phase-sensitive. Grounded loosely on the
//! teacher's `parser::mod::FromWords` per-production dispatch, but written
//! against this spec's grammar from scratch: the teacher's grammar
//! (`{Nation}: {UnitType} {Location} {Command}`) has no counterpart here.

pub mod error;

use serde::{Deserialize, Serialize};

use crate::geo::RegionId;
use crate::nation::NationId;
use crate::order::{Order, OrderKind};
use crate::time::Phase;
use crate::UnitType;

use self::error::SyntaxError;

/// The outcome of parsing one raw order string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxResult {
    pub player_id: NationId,
    pub raw: String,
    pub normalized: String,
    pub valid: bool,
    pub errors: Vec<String>,
    pub order: Option<Order>,
}

/// Normalizes a raw order string per §4.2: lowercase, trim, collapse
/// whitespace, fold dash variants to ASCII `-`, fold `/` to `_`, strip
/// punctuation outside `[a-z0-9 _-]`, and pad `-` with single spaces. This
/// function is idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let dashes_folded: String = lowered
        .chars()
        .map(|c| if is_dash_variant(c) { '-' } else { c })
        .collect();
    let slashes_folded = dashes_folded.replace('/', "_");
    let stripped: String = slashes_folded
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || c.is_whitespace())
        .collect();
    let padded = stripped.replace('-', " - ");
    collapse_whitespace(&padded)
}

fn is_dash_variant(c: char) -> bool {
    matches!(
        c,
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}'
    )
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a raw order string for the given phase (§4.2 public contract).
pub fn parse(player_id: &NationId, raw_text: &str, phase: Phase) -> SyntaxResult {
    let normalized = normalize(raw_text);
    let tokens: Vec<&str> = normalized.split(' ').filter(|s| !s.is_empty()).collect();

    let parsed = match phase {
        Phase::Movement => parse_movement(&tokens),
        Phase::Retreat => parse_retreat(&tokens),
        Phase::Adjustment => parse_adjustment(&tokens),
    };

    match parsed {
        Ok(order) => SyntaxResult {
            player_id: player_id.clone(),
            raw: raw_text.to_string(),
            normalized,
            valid: true,
            errors: Vec::new(),
            order: Some(order),
        },
        Err(e) => SyntaxResult {
            player_id: player_id.clone(),
            raw: raw_text.to_string(),
            normalized,
            valid: false,
            errors: vec![e.to_string()],
            order: None,
        },
    }
}

const MOVEMENT_SHAPE: &str = "P - Q, P hold, P s Q, P s Q - R, or P c Q - R";
const RETREAT_SHAPE: &str = "P - Q";
const ADJUSTMENT_SHAPE: &str = "build (army|fleet) P or disband (army|fleet) P";

fn parse_movement(tokens: &[&str]) -> Result<Order, SyntaxError> {
    if tokens.is_empty() {
        return Err(SyntaxError::new(MOVEMENT_SHAPE, ""));
    }
    let origin = RegionId::new(tokens[0]);
    let kind = match tokens {
        [_, "hold"] => OrderKind::Hold,
        [_, "-", dest] => OrderKind::Move {
            destination: RegionId::new(*dest),
        },
        [_, "s", supported] => OrderKind::SupportHold {
            support_origin: RegionId::new(*supported),
        },
        [_, "s", supported, "-", dest] => OrderKind::SupportMove {
            support_origin: RegionId::new(*supported),
            support_destination: RegionId::new(*dest),
        },
        [_, "c", army_origin, "-", army_dest] => OrderKind::Convoy {
            convoy_origin: RegionId::new(*army_origin),
            convoy_destination: RegionId::new(*army_dest),
        },
        _ => return Err(SyntaxError::new(MOVEMENT_SHAPE, tokens.join(" "))),
    };
    Ok(Order { origin, kind })
}

fn parse_retreat(tokens: &[&str]) -> Result<Order, SyntaxError> {
    match tokens {
        [origin, "-", dest] => Ok(Order {
            origin: RegionId::new(*origin),
            kind: OrderKind::Retreat {
                destination: RegionId::new(*dest),
            },
        }),
        _ => Err(SyntaxError::new(RETREAT_SHAPE, tokens.join(" "))),
    }
}

fn parse_adjustment(tokens: &[&str]) -> Result<Order, SyntaxError> {
    match tokens {
        [verb @ ("build" | "disband"), unit_type, origin] => {
            let unit_type: UnitType = unit_type
                .parse()
                .map_err(|_| SyntaxError::new(ADJUSTMENT_SHAPE, tokens.join(" ")))?;
            let kind = if *verb == "build" {
                OrderKind::Build { unit_type }
            } else {
                OrderKind::Disband { unit_type }
            };
            Ok(Order {
                origin: RegionId::new(*origin),
                kind,
            })
        }
        _ => Err(SyntaxError::new(ADJUSTMENT_SHAPE, tokens.join(" "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["Lon - Wal", "STP/SC", "bur   s  mun", "  lon–wal "] {
            let once = normalize(raw);
            let twice = normalize(&once);
            assert_eq!(once, twice, "normalize not idempotent for {raw:?}");
        }
    }

    #[test]
    fn normalize_folds_coast_slash() {
        assert_eq!(normalize("stp/sc - bot"), "stp_sc - bot");
    }

    #[test]
    fn parses_support_move_before_support_hold() {
        let player = NationId::new("ENG");
        let result = parse(&player, "nth s pic - bel", Phase::Movement);
        assert!(result.valid);
        assert!(matches!(
            result.order.unwrap().kind,
            OrderKind::SupportMove { .. }
        ));
    }

    #[test]
    fn rejects_partial_consumption() {
        let player = NationId::new("ENG");
        let result = parse(&player, "lon - wal extra", Phase::Movement);
        assert!(!result.valid);
    }
}
