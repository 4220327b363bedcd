// CSV export of a player's stat tables.

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use fieldglass_core::columns::StatTable;

use crate::view::StatsView;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Write one table as CSV, column labels as the header row.
pub fn write_table<W: Write>(table: &StatTable, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `player_<id>_<kind>_<level>.csv` for every table in `view`, empty
/// tables included (header only). Returns the written paths.
pub fn export_stats(dir: &Path, player_id: i64, view: &StatsView) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(view.tables.len());
    for table in &view.tables {
        let name = format!(
            "player_{player_id}_{}_{}.csv",
            table.kind.section().trim_start_matches("standard_"),
            view.level.as_query().to_ascii_lowercase()
        );
        let path = dir.join(name);
        let csv_err = |e: csv::Error| ExportError::Csv {
            path: path.display().to_string(),
            source: e,
        };
        let file = std::fs::File::create(&path).map_err(|e| csv_err(e.into()))?;
        write_table(table, file).map_err(csv_err)?;
        written.push(path);
    }

    info!(player_id, files = written.len(), dir = %dir.display(), "exported stat tables");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldglass_core::columns::StatKind;
    use fieldglass_core::level::{CompetitionTier, LevelFilter};
    use fieldglass_core::season::SeasonRecord;

    #[test]
    fn table_csv_has_header_and_rows() {
        let record = SeasonRecord::new(2021, "EL").with_team("Akron, OH").with_stat("era", 3.25);
        let table = StatTable::build(StatKind::Pitching, [&record]);
        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Season,Team,Lg,G,GS,W,L,ERA,IP,H,R,ER,HR,BB,SO,WHIP,ERA+")
        );
        assert_eq!(lines.next(), Some("2021,\"Akron, OH\",EL,,,,,3.25,,,,,,,,,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn export_writes_one_file_per_table() {
        let dir = std::env::temp_dir().join("fieldglass_export_test");
        let _ = std::fs::remove_dir_all(&dir);
        let view = StatsView {
            levels: vec![LevelFilter::All],
            level: LevelFilter::Tier(CompetitionTier::Aa),
            tables: StatKind::ALL
                .iter()
                .map(|&k| StatTable::build(k, std::iter::empty::<&SeasonRecord>()))
                .collect(),
        };
        let written = export_stats(&dir, 5, &view).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(written[0], dir.join("player_5_batting_aa.csv"));
        let fielding = std::fs::read_to_string(dir.join("player_5_fielding_aa.csv")).unwrap();
        assert!(fielding.starts_with("Season,Team,Lg,Pos"));
    }
}
