//! The turn-code state machine: `(year_index, season, phase)` and its fixed
//! transition table (§3, §4.5). Grounded structurally on the teacher's
//! `Time`/`Calendar` (`calendar.rs`, `time.rs`), retargeted at this spec's
//! three phases (Movement/Retreat/Adjustment, not Main/Retreat/Build) and
//! two-character wire format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parser::error::TurnCodeError;

pub const BASE_YEAR: u32 = 1901;

/// One of the three seasons a year is divided into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    Spring,
    Fall,
    Winter,
}

impl Season {
    fn code(self) -> char {
        match self {
            Season::Spring => 'S',
            Season::Fall => 'F',
            Season::Winter => 'W',
        }
    }

    fn from_code(c: char) -> Option<Self> {
        match c {
            'S' => Some(Season::Spring),
            'F' => Some(Season::Fall),
            'W' => Some(Season::Winter),
            _ => None,
        }
    }
}

/// One of the three phases within a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Movement,
    Retreat,
    Adjustment,
}

impl Phase {
    fn code(self) -> char {
        match self {
            Phase::Movement => 'M',
            Phase::Retreat => 'R',
            Phase::Adjustment => 'A',
        }
    }

    fn from_code(c: char) -> Option<Self> {
        match c {
            'M' => Some(Phase::Movement),
            'R' => Some(Phase::Retreat),
            'A' => Some(Phase::Adjustment),
            _ => None,
        }
    }
}

/// The discrete time step identifying the current adjudication unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCode {
    pub year_index: u32,
    pub season: Season,
    pub phase: Phase,
}

impl TurnCode {
    pub fn new(year_index: u32, season: Season, phase: Phase) -> Self {
        TurnCode {
            year_index,
            season,
            phase,
        }
    }

    pub fn initial() -> Self {
        TurnCode::new(0, Season::Spring, Phase::Movement)
    }

    pub fn year(&self) -> u32 {
        BASE_YEAR + self.year_index
    }

    /// The single unconditional next step in the fixed transition table
    /// (§3): `Spring-M -> Spring-R -> Fall-M -> Fall-R -> Winter-A ->
    /// (year+1) Spring-M`. Whether a Retreat or Adjustment phase is actually
    /// *played*, as opposed to auto-skipped, is a decision the orchestrator
    /// makes from the resolution result, not something this table encodes.
    pub fn advance(&self) -> TurnCode {
        match (self.season, self.phase) {
            (Season::Spring, Phase::Movement) => {
                TurnCode::new(self.year_index, Season::Spring, Phase::Retreat)
            }
            (Season::Spring, Phase::Retreat) => {
                TurnCode::new(self.year_index, Season::Fall, Phase::Movement)
            }
            (Season::Fall, Phase::Movement) => {
                TurnCode::new(self.year_index, Season::Fall, Phase::Retreat)
            }
            (Season::Fall, Phase::Retreat) => {
                TurnCode::new(self.year_index, Season::Winter, Phase::Adjustment)
            }
            (Season::Winter, Phase::Adjustment) => {
                TurnCode::new(self.year_index + 1, Season::Spring, Phase::Movement)
            }
            // Retreat/Adjustment phases only ever occur paired with their
            // season as enumerated above; any other combination cannot be
            // reached through `advance`/`FromStr` and is left unreachable.
            _ => unreachable!("invalid (season, phase) combination: {:?}", self),
        }
    }
}

impl fmt::Display for TurnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.year(),
            self.season.code(),
            self.phase.code()
        )
    }
}

impl FromStr for TurnCode {
    type Err = TurnCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let (year, season_code, phase_code) = match (parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(s), Some(p)) if parts.next().is_none() => (y, s, p),
            _ => return Err(TurnCodeError::MalformedShape(s.to_string())),
        };

        let year: u32 = year
            .parse()
            .map_err(|_| TurnCodeError::MalformedShape(s.to_string()))?;
        if year < BASE_YEAR {
            return Err(TurnCodeError::MalformedShape(s.to_string()));
        }

        let season_char = single_char(season_code).ok_or_else(|| TurnCodeError::MalformedShape(s.to_string()))?;
        let phase_char = single_char(phase_code).ok_or_else(|| TurnCodeError::MalformedShape(s.to_string()))?;

        let season = Season::from_code(season_char)
            .ok_or_else(|| TurnCodeError::MalformedShape(s.to_string()))?;
        let phase = Phase::from_code(phase_char)
            .ok_or_else(|| TurnCodeError::MalformedShape(s.to_string()))?;

        Ok(TurnCode::new(year - BASE_YEAR, season, phase))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        None
    } else {
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_round_trip() {
        let code: TurnCode = "1901-S-M".parse().unwrap();
        assert_eq!(code, TurnCode::initial());
        assert_eq!(code.to_string(), "1901-S-M");
    }

    #[test]
    fn advance_sequence() {
        let mut code = TurnCode::initial();
        for expected in ["1901-S-R", "1901-F-M", "1901-F-R", "1901-W-A", "1902-S-M"] {
            code = code.advance();
            assert_eq!(code.to_string(), expected);
        }
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!("1901SM".parse::<TurnCode>().is_err());
        assert!("1901-X-M".parse::<TurnCode>().is_err());
        assert!("abcd-S-M".parse::<TurnCode>().is_err());
    }
}
