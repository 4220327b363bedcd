// Lifetime stat tables: fixed column sets per stat kind.

use serde::Serialize;
use std::fmt;

use crate::season::SeasonRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Batting,
    Pitching,
    Fielding,
}

/// (payload key, column label)
pub type Column = (&'static str, &'static str);

const BATTING_COLUMNS: &[Column] = &[
    ("season", "Season"),
    ("team", "Team"),
    ("lg", "Lg"),
    ("g", "G"),
    ("pa", "PA"),
    ("ab", "AB"),
    ("r", "R"),
    ("h", "H"),
    ("doubles", "2B"),
    ("triples", "3B"),
    ("hr", "HR"),
    ("rbi", "RBI"),
    ("sb", "SB"),
    ("cs", "CS"),
    ("bb", "BB"),
    ("so", "SO"),
    ("ba", "AVG"),
    ("obp", "OBP"),
    ("slg", "SLG"),
    ("ops", "OPS"),
    ("ops_plus", "OPS+"),
];

const PITCHING_COLUMNS: &[Column] = &[
    ("season", "Season"),
    ("team", "Team"),
    ("lg", "Lg"),
    ("g", "G"),
    ("gs", "GS"),
    ("w", "W"),
    ("l", "L"),
    ("era", "ERA"),
    ("ip", "IP"),
    ("h", "H"),
    ("r", "R"),
    ("er", "ER"),
    ("hr", "HR"),
    ("bb", "BB"),
    ("so", "SO"),
    ("whip", "WHIP"),
    ("era_plus", "ERA+"),
];

const FIELDING_COLUMNS: &[Column] = &[
    ("season", "Season"),
    ("team", "Team"),
    ("lg", "Lg"),
    ("pos", "Pos"),
    ("g", "G"),
    ("gs", "GS"),
    ("inn", "Inn"),
    ("po", "PO"),
    ("a", "A"),
    ("e", "E"),
    ("dp", "DP"),
    ("fld_pct", "Fld%"),
    ("rf9", "RF/9"),
];

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Batting, StatKind::Pitching, StatKind::Fielding];

    pub fn columns(&self) -> &'static [Column] {
        match self {
            StatKind::Batting => BATTING_COLUMNS,
            StatKind::Pitching => PITCHING_COLUMNS,
            StatKind::Fielding => FIELDING_COLUMNS,
        }
    }

    /// Endpoint section name, e.g. `standard_batting`.
    pub fn section(&self) -> &'static str {
        match self {
            StatKind::Batting => "standard_batting",
            StatKind::Pitching => "standard_pitching",
            StatKind::Fielding => "standard_fielding",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatKind::Batting => "Batting",
            StatKind::Pitching => "Pitching",
            StatKind::Fielding => "Fielding",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Rendered rows for one stat kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTable {
    pub kind: StatKind,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl StatTable {
    /// Render `records` in the order given. Absent cells are empty strings.
    pub fn build<'a, I>(kind: StatKind, records: I) -> Self
    where
        I: IntoIterator<Item = &'a SeasonRecord>,
    {
        let columns = kind.columns();
        let rows = records
            .into_iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|(key, _)| record.cell(key).map(|c| c.plain()).unwrap_or_default())
                    .collect()
            })
            .collect();
        StatTable {
            kind,
            headers: columns.iter().map(|(_, label)| *label).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn batting_row_cells() {
        let record = SeasonRecord::from(json!({
            "season": 2021, "team": "TEX", "lg": "AL", "g": 150, "ba": 0.3, "ops_plus": null
        }));
        let table = StatTable::build(StatKind::Batting, [&record]);
        assert_eq!(table.headers.len(), 21);
        assert_eq!(table.headers[8], "2B");
        let row = &table.rows[0];
        assert_eq!(row[0], "2021");
        assert_eq!(row[1], "TEX");
        assert_eq!(row[2], "AL");
        assert_eq!(row[3], "150");
        assert_eq!(row[16], "0.3");
        assert_eq!(row[20], "");
    }

    #[test]
    fn fielding_keeps_text_positions() {
        let record = SeasonRecord::from(json!({ "season": "2019", "lg": "EL", "pos": "CF", "fld_pct": 0.985 }));
        let table = StatTable::build(StatKind::Fielding, [&record]);
        assert_eq!(table.rows[0][3], "CF");
        assert_eq!(table.rows[0][11], "0.985");
        assert_eq!(table.rows[0][1], "");
    }

    #[test]
    fn empty_collection_is_flagged() {
        let none: Vec<SeasonRecord> = Vec::new();
        let table = StatTable::build(StatKind::Pitching, &none);
        assert!(table.is_empty());
        assert_eq!(table.headers.last(), Some(&"ERA+"));
    }
}
