// Season stat lines as delivered by the stats endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::defaults::present;
use crate::format::CellValue;
use crate::level::CompetitionTier;

// ---------------------------------------------------------------------------
// SeasonValue
// ---------------------------------------------------------------------------

/// A season exactly as it arrived: numeric or textual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeasonValue {
    Number(serde_json::Number),
    Text(String),
}

impl SeasonValue {
    /// Integer season used for ordering. Text is read as a leading integer
    /// (surrounding junk ignored); anything unparseable is 0.
    pub fn number(&self) -> i64 {
        match self {
            SeasonValue::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(0),
            SeasonValue::Text(s) => parse_leading_int(s).unwrap_or(0),
        }
    }
}

impl From<i64> for SeasonValue {
    fn from(season: i64) -> Self {
        SeasonValue::Number(season.into())
    }
}

impl From<&str> for SeasonValue {
    fn from(season: &str) -> Self {
        SeasonValue::Text(season.to_string())
    }
}

impl fmt::Display for SeasonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonValue::Number(n) => write!(f, "{n}"),
            SeasonValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parse an optional sign followed by decimal digits at the start of `s`
/// (after leading whitespace). Returns `None` when no digit is found.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

// ---------------------------------------------------------------------------
// SeasonRecord
// ---------------------------------------------------------------------------

/// One season/team/league stat line. Batting, pitching and fielding lines
/// share this shape; the stat keys differ.
///
/// Deserialization is total: any JSON value becomes a record. Keys whose
/// value has an unexpected type are kept in `stats` untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct SeasonRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<SeasonValue>,
    #[serde(rename = "lg", skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(flatten)]
    pub stats: BTreeMap<String, Value>,
}

impl SeasonRecord {
    /// Minimal record for a season and league code.
    pub fn new(season: impl Into<SeasonValue>, league: &str) -> Self {
        Self {
            season: Some(season.into()),
            league: Some(league.to_string()),
            ..Self::default()
        }
    }

    /// Builder-style stat insertion.
    pub fn with_stat(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.stats.insert(key.to_string(), value.into());
        self
    }

    pub fn with_team(mut self, team: &str) -> Self {
        self.team = Some(team.to_string());
        self
    }

    /// Season used for ordering; missing or unparseable seasons are 0.
    pub fn season_number(&self) -> i64 {
        self.season.as_ref().map(SeasonValue::number).unwrap_or(0)
    }

    /// Tier derived from the league code.
    pub fn tier(&self) -> CompetitionTier {
        CompetitionTier::classify(self.league.as_deref())
    }

    /// Numeric stat, if present and numeric.
    pub fn stat(&self, key: &str) -> Option<f64> {
        present(self.stats.get(key)).and_then(Value::as_f64)
    }

    /// Any field (including season, lg and team) as a display cell.
    pub fn cell(&self, key: &str) -> Option<CellValue> {
        match key {
            "season" => self.season.as_ref().map(|s| match s {
                SeasonValue::Number(n) => CellValue::Number(n.as_f64().unwrap_or(0.0)),
                SeasonValue::Text(t) => CellValue::Text(t.clone()),
            }),
            "lg" if self.league.is_some() => self.league.clone().map(CellValue::Text),
            "team" if self.team.is_some() => self.team.clone().map(CellValue::Text),
            _ => present(self.stats.get(key)).and_then(CellValue::from_json),
        }
    }
}

impl From<Value> for SeasonRecord {
    fn from(value: Value) -> Self {
        let Value::Object(map) = value else {
            return SeasonRecord::default();
        };
        from_map(map)
    }
}

fn from_map(map: Map<String, Value>) -> SeasonRecord {
    let mut record = SeasonRecord::default();
    for (key, value) in map {
        match (key.as_str(), value) {
            (_, Value::Null) => {}
            ("season", Value::Number(n)) => record.season = Some(SeasonValue::Number(n)),
            ("season", Value::String(s)) => record.season = Some(SeasonValue::Text(s)),
            ("lg", Value::String(s)) => record.league = Some(s),
            ("team", Value::String(s)) => record.team = Some(s),
            (_, other) => {
                record.stats.insert(key, other);
            }
        }
    }
    record
}

/// Decode a stats endpoint response. Anything other than a JSON array is an
/// empty collection.
pub fn records_from_json(value: Value) -> Vec<SeasonRecord> {
    match value {
        Value::Array(items) => items.into_iter().map(SeasonRecord::from).collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
