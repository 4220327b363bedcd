// Side-by-side comparison tables for two players.
//
// Each category has a fixed, ordered field list. A row is produced for every
// field regardless of data; whatever one side lacks renders as "N/A".

use serde::Serialize;

use crate::format::{CellValue, FieldFormat};
use crate::prediction::Prediction;
use crate::ratings::RatingRecord;
use crate::season::SeasonRecord;

// ---------------------------------------------------------------------------
// Field sources
// ---------------------------------------------------------------------------

/// Anything a comparison row can read a keyed display cell from.
pub trait FieldSource {
    fn cell(&self, key: &str) -> Option<CellValue>;
}

impl FieldSource for SeasonRecord {
    fn cell(&self, key: &str) -> Option<CellValue> {
        SeasonRecord::cell(self, key)
    }
}

impl FieldSource for RatingRecord {
    fn cell(&self, key: &str) -> Option<CellValue> {
        self.field(key).map(CellValue::Number)
    }
}

impl FieldSource for Prediction {
    fn cell(&self, key: &str) -> Option<CellValue> {
        Prediction::cell(self, key)
    }
}

// ---------------------------------------------------------------------------
// Field lists
// ---------------------------------------------------------------------------

/// One comparison field. `keys` are tried in order; the first present wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub keys: &'static [&'static str],
    pub label: &'static str,
    pub format: FieldFormat,
}

const fn field(key: &'static [&'static str], label: &'static str, format: FieldFormat) -> FieldSpec {
    FieldSpec {
        keys: key,
        label,
        format,
    }
}

pub const STAT_FIELDS: [FieldSpec; 15] = [
    field(&["season"], "Season", FieldFormat::Label),
    field(&["team"], "Team", FieldFormat::Label),
    field(&["g"], "Games", FieldFormat::Magnitude),
    field(&["pa"], "PA", FieldFormat::Magnitude),
    field(&["ab"], "AB", FieldFormat::Magnitude),
    field(&["h"], "Hits", FieldFormat::Magnitude),
    field(&["hr"], "HR", FieldFormat::Magnitude),
    field(&["rbi"], "RBI", FieldFormat::Magnitude),
    field(&["bb"], "BB", FieldFormat::Magnitude),
    field(&["so"], "SO", FieldFormat::Magnitude),
    field(&["sb"], "SB", FieldFormat::Magnitude),
    field(&["ba"], "AVG", FieldFormat::Percentage),
    field(&["obp"], "OBP", FieldFormat::Percentage),
    field(&["slg"], "SLG", FieldFormat::Percentage),
    field(&["ops"], "OPS", FieldFormat::Percentage),
];

pub const RATING_KEYS: [&str; 10] = [
    "contact_left",
    "power_left",
    "discipline",
    "vision",
    "fielding",
    "arm_strength",
    "speed",
    "stealing",
    "overall_rating",
    "potential_rating",
];

pub const PREDICTION_FIELDS: [FieldSpec; 8] = [
    field(&["mlb_debut_probability"], "MLB Debut Probability", FieldFormat::Percentage),
    field(&["projected_career_war"], "Projected Career WAR", FieldFormat::Magnitude),
    field(&["current_career_war"], "Current Career WAR", FieldFormat::Magnitude),
    field(&["ceiling_comparison"], "Ceiling", FieldFormat::Label),
    field(&["floor_comparison"], "Floor", FieldFormat::Label),
    field(&["eta_mlb", "debut_year"], "ETA MLB", FieldFormat::Label),
    field(&["hall_of_fame_probability"], "Hall of Fame Probability", FieldFormat::Percentage),
    field(&["risk_factor"], "Risk Factor", FieldFormat::Label),
];

/// "arm_strength" → "ARM STRENGTH". Only the first underscore becomes a space.
pub fn rating_label(key: &str) -> String {
    key.replacen('_', " ", 1).to_uppercase()
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub key: String,
    pub label: String,
    pub player1: String,
    pub player2: String,
}

/// Everything compared for one player. Each part may be missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonSide<'a> {
    pub stats: Option<&'a SeasonRecord>,
    pub ratings: Option<&'a RatingRecord>,
    pub prediction: Option<&'a Prediction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub stats: Vec<ComparisonRow>,
    pub ratings: Vec<ComparisonRow>,
    pub predictions: Vec<ComparisonRow>,
}

fn lookup<S: FieldSource + ?Sized>(source: Option<&S>, keys: &[&str]) -> Option<CellValue> {
    let source = source?;
    keys.iter().find_map(|key| source.cell(key))
}

/// Build the rows for one category.
pub fn compare_fields<S: FieldSource + ?Sized>(
    fields: &[FieldSpec],
    left: Option<&S>,
    right: Option<&S>,
) -> Vec<ComparisonRow> {
    fields
        .iter()
        .map(|spec| ComparisonRow {
            key: spec.keys[0].to_string(),
            label: spec.label.to_string(),
            player1: spec.format.render(lookup(left, spec.keys).as_ref()),
            player2: spec.format.render(lookup(right, spec.keys).as_ref()),
        })
        .collect()
}

fn compare_ratings(left: Option<&RatingRecord>, right: Option<&RatingRecord>) -> Vec<ComparisonRow> {
    RATING_KEYS
        .iter()
        .map(|key| ComparisonRow {
            key: key.to_string(),
            label: rating_label(key),
            player1: FieldFormat::Rating.render(lookup(left, &[*key]).as_ref()),
            player2: FieldFormat::Rating.render(lookup(right, &[*key]).as_ref()),
        })
        .collect()
}

/// Assemble the three comparison tables. Categories are independent: a side
/// missing ratings still gets its stat and prediction rows.
pub fn assemble_comparison(left: ComparisonSide<'_>, right: ComparisonSide<'_>) -> ComparisonView {
    ComparisonView {
        stats: compare_fields(&STAT_FIELDS, left.stats, right.stats),
        ratings: compare_ratings(left.ratings, right.ratings),
        predictions: compare_fields(&PREDICTION_FIELDS, left.prediction, right.prediction),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
