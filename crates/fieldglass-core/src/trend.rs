// Historical overall-rating series and the merged trend chart.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::defaults::present;
use crate::season::SeasonValue;

/// One season's overall rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub season: SeasonValue,
    pub overall: f64,
}

impl HistoryEntry {
    pub fn new(season: impl Into<SeasonValue>, overall: f64) -> Self {
        Self {
            season: season.into(),
            overall,
        }
    }

    /// Lenient decode; entries without a usable season or numeric overall are
    /// dropped.
    fn from_json(value: &Value) -> Option<Self> {
        let season = match present(value.get("season"))? {
            Value::Number(n) => SeasonValue::Number(n.clone()),
            Value::String(s) => SeasonValue::Text(s.clone()),
            _ => return None,
        };
        let overall = present(value.get("overall"))?.as_f64()?;
        Some(Self { season, overall })
    }
}

/// Rating history carried by a ratings response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RatingHistory {
    /// Hitting series for two-way players, the only series otherwise.
    pub primary: Vec<HistoryEntry>,
    /// Pitching series, two-way players only.
    pub pitching: Option<Vec<HistoryEntry>>,
}

/// Pull `historical_overalls` out of a ratings response. Two-way responses
/// nest one series under each role; single-role responses carry one series at
/// the top level.
pub fn history_from_response(response: &Value) -> RatingHistory {
    let grades = response.get("grades");
    let role = |name: &str| grades.and_then(|g| g.get(name)).filter(|v| v.is_object());

    match (role("hitting"), role("pitching")) {
        (Some(hitting), Some(pitching)) => RatingHistory {
            primary: series(hitting),
            pitching: Some(series(pitching)),
        },
        _ => RatingHistory {
            primary: series(response),
            pitching: None,
        },
    }
}

fn series(holder: &Value) -> Vec<HistoryEntry> {
    holder
        .get("historical_overalls")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(HistoryEntry::from_json).collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Trend chart
// ---------------------------------------------------------------------------

/// A single-series chart row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallPoint {
    pub season: i64,
    #[serde(rename = "Overall")]
    pub overall: f64,
}

/// A two-series chart row. Gaps stay `null` so a chart draws a break rather
/// than a dip to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitPoint {
    pub season: i64,
    #[serde(rename = "Hitting")]
    pub hitting: Option<f64>,
    #[serde(rename = "Pitching")]
    pub pitching: Option<f64>,
}

/// Chart-ready trend data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum TrendChart {
    /// Nothing to plot; callers show an explicit empty state.
    Empty,
    Overall(Vec<OverallPoint>),
    Split(Vec<SplitPoint>),
}

impl TrendChart {
    pub fn is_empty(&self) -> bool {
        matches!(self, TrendChart::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            TrendChart::Empty => 0,
            TrendChart::Overall(rows) => rows.len(),
            TrendChart::Split(rows) => rows.len(),
        }
    }
}

/// Merge a hitting series with an optional pitching series.
///
/// Both non-empty: one row per season in the sorted union, each side holding
/// its value for that season (first entry wins) or `None`. Exactly one
/// non-empty: that series alone, ordered by season, under `Overall`. Neither:
/// [`TrendChart::Empty`].
pub fn merge_trends(hitting: &[HistoryEntry], pitching: Option<&[HistoryEntry]>) -> TrendChart {
    let pitching = pitching.unwrap_or_default();
    match (hitting.is_empty(), pitching.is_empty()) {
        (true, true) => TrendChart::Empty,
        (false, true) => single_series(hitting),
        (true, false) => single_series(pitching),
        (false, false) => {
            let seasons: BTreeSet<i64> = hitting
                .iter()
                .chain(pitching)
                .map(|e| e.season.number())
                .collect();
            let value_at = |entries: &[HistoryEntry], season: i64| {
                entries
                    .iter()
                    .find(|e| e.season.number() == season)
                    .map(|e| e.overall)
            };
            TrendChart::Split(
                seasons
                    .into_iter()
                    .map(|season| SplitPoint {
                        season,
                        hitting: value_at(hitting, season),
                        pitching: value_at(pitching, season),
                    })
                    .collect(),
            )
        }
    }
}

fn single_series(entries: &[HistoryEntry]) -> TrendChart {
    let mut rows: Vec<OverallPoint> = entries
        .iter()
        .map(|e| OverallPoint {
            season: e.season.number(),
            overall: e.overall,
        })
        .collect();
    rows.sort_by_key(|p| p.season);
    TrendChart::Overall(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
