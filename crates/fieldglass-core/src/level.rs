// Competition tiers and the league-code lookup table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// League table
// ---------------------------------------------------------------------------

/// League code → tier. Matching is exact (case-sensitive).
///
/// PION (Pioneer League) is listed once, under A. Rookie-level leagues are the
/// complex leagues only.
const LEAGUE_TABLE: &[(&str, CompetitionTier)] = &[
    ("AL", CompetitionTier::Mlb),
    ("NL", CompetitionTier::Mlb),
    ("IL", CompetitionTier::Aaa),
    ("PCL", CompetitionTier::Aaa),
    ("EL", CompetitionTier::Aa),
    ("SL", CompetitionTier::Aa),
    ("TL", CompetitionTier::Aa),
    ("LASE", CompetitionTier::A),
    ("SALL", CompetitionTier::A),
    ("CARL", CompetitionTier::A),
    ("FLOR", CompetitionTier::A),
    ("MIDW", CompetitionTier::A),
    ("NYPL", CompetitionTier::A),
    ("PION", CompetitionTier::A),
    ("ARIZ", CompetitionTier::Rookie),
    ("GULF", CompetitionTier::Rookie),
    ("HS", CompetitionTier::Hs),
    ("NCAA", CompetitionTier::Ncaa),
];

/// Ladder used as the tie-breaker when ordering seasons across all levels.
/// Tiers not on the ladder rank before every laddered tier.
pub const TIER_LADDER: [CompetitionTier; 5] = [
    CompetitionTier::Rookie,
    CompetitionTier::A,
    CompetitionTier::Aa,
    CompetitionTier::Aaa,
    CompetitionTier::Mlb,
];

// ---------------------------------------------------------------------------
// CompetitionTier
// ---------------------------------------------------------------------------

/// A competition level derived from a league code. Never stored on records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetitionTier {
    #[serde(rename = "MLB")]
    Mlb,
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    A,
    Rookie,
    #[serde(rename = "HS")]
    Hs,
    #[serde(rename = "NCAA")]
    Ncaa,
    Unknown,
}

impl CompetitionTier {
    /// Classify a league code. Total: empty, missing or unmapped codes yield
    /// `Unknown`.
    pub fn classify(league: Option<&str>) -> Self {
        let Some(code) = league else {
            return CompetitionTier::Unknown;
        };
        LEAGUE_TABLE
            .iter()
            .find(|(lg, _)| *lg == code)
            .map(|(_, tier)| *tier)
            .unwrap_or(CompetitionTier::Unknown)
    }

    /// League codes belonging to this tier, in table order. Empty for `Unknown`.
    pub fn leagues(&self) -> Vec<&'static str> {
        LEAGUE_TABLE
            .iter()
            .filter(|(_, tier)| tier == self)
            .map(|(lg, _)| *lg)
            .collect()
    }

    /// Position on [`TIER_LADDER`], or -1 when the tier is not laddered.
    pub fn ladder_rank(&self) -> i32 {
        TIER_LADDER
            .iter()
            .position(|t| t == self)
            .map(|i| i as i32)
            .unwrap_or(-1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompetitionTier::Mlb => "MLB",
            CompetitionTier::Aaa => "AAA",
            CompetitionTier::Aa => "AA",
            CompetitionTier::A => "A",
            CompetitionTier::Rookie => "Rookie",
            CompetitionTier::Hs => "HS",
            CompetitionTier::Ncaa => "NCAA",
            CompetitionTier::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CompetitionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LevelFilter
// ---------------------------------------------------------------------------

/// Query parameter for stat views: every level, or one specific tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Tier(CompetitionTier),
}

impl LevelFilter {
    /// Options offered by the player directory, in display order.
    pub fn directory_options() -> Vec<LevelFilter> {
        vec![
            LevelFilter::All,
            LevelFilter::Tier(CompetitionTier::Mlb),
            LevelFilter::Tier(CompetitionTier::Aaa),
            LevelFilter::Tier(CompetitionTier::Aa),
            LevelFilter::Tier(CompetitionTier::A),
            LevelFilter::Tier(CompetitionTier::Rookie),
            LevelFilter::Tier(CompetitionTier::Hs),
            LevelFilter::Tier(CompetitionTier::Ncaa),
        ]
    }

    /// Query-string form ("all", "MLB", "Rookie", ...).
    pub fn as_query(&self) -> &'static str {
        match self {
            LevelFilter::All => "all",
            LevelFilter::Tier(tier) => tier.label(),
        }
    }

    /// Chip label shown to users.
    pub fn display_label(&self) -> &'static str {
        match self {
            LevelFilter::All => "All Levels",
            LevelFilter::Tier(tier) => tier.label(),
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level `{0}` (expected all, MLB, AAA, AA, A, Rookie, HS or NCAA)")]
pub struct ParseLevelError(pub String);

impl FromStr for LevelFilter {
    type Err = ParseLevelError;

    /// Case-insensitive; "Unknown" is not a selectable level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tier = match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => return Ok(LevelFilter::All),
            "MLB" => CompetitionTier::Mlb,
            "AAA" => CompetitionTier::Aaa,
            "AA" => CompetitionTier::Aa,
            "A" => CompetitionTier::A,
            "ROOKIE" | "RK" => CompetitionTier::Rookie,
            "HS" => CompetitionTier::Hs,
            "NCAA" => CompetitionTier::Ncaa,
            _ => return Err(ParseLevelError(s.to_string())),
        };
        Ok(LevelFilter::Tier(tier))
    }
}

impl Serialize for LevelFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_query())
    }
}

impl<'de> Deserialize<'de> for LevelFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
