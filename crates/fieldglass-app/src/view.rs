// View assembly and plain-text rendering for the CLI.
//
// Views are built from a PlayerSnapshot with fieldglass-core; the render_*
// functions turn them into aligned text for stdout.

use serde::Serialize;

use fieldglass_core::bucketing::{available_levels, filter_and_order, filtered_copy, latest_season};
use fieldglass_core::columns::{StatKind, StatTable};
use fieldglass_core::compare::{assemble_comparison, ComparisonRow, ComparisonSide, ComparisonView};
use fieldglass_core::comps::MlbComp;
use fieldglass_core::defaults::MISSING;
use fieldglass_core::directory::PlayerSummary;
use fieldglass_core::format::to_fixed;
use fieldglass_core::level::LevelFilter;
use fieldglass_core::prediction::Prediction;
use fieldglass_core::ratings::{RatingBand, RatingRecord};
use fieldglass_core::reconcile::PlayerRatings;
use fieldglass_core::season::SeasonRecord;
use fieldglass_core::trend::{merge_trends, TrendChart};

use crate::session::PlayerSnapshot;

// ---------------------------------------------------------------------------
// Stats view
// ---------------------------------------------------------------------------

/// Level options plus the three stat tables filtered to one level.
#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    pub levels: Vec<LevelFilter>,
    pub level: LevelFilter,
    pub tables: Vec<StatTable>,
}

pub fn stats_view(snapshot: &PlayerSnapshot, level: LevelFilter) -> StatsView {
    let levels = available_levels(
        snapshot
            .batting
            .iter()
            .chain(&snapshot.pitching)
            .chain(&snapshot.fielding),
    );
    let tables = StatKind::ALL
        .iter()
        .map(|&kind| {
            let mut records = snapshot.stats(kind).to_vec();
            StatTable::build(kind, filter_and_order(&mut records, level))
        })
        .collect();
    StatsView {
        levels,
        level,
        tables,
    }
}

// ---------------------------------------------------------------------------
// Comparison view
// ---------------------------------------------------------------------------

/// Latest batting season within `level`.
pub fn latest_batting(snapshot: &PlayerSnapshot, level: LevelFilter) -> Option<SeasonRecord> {
    let filtered = filtered_copy(&snapshot.batting, level);
    latest_season(&filtered).cloned()
}

pub fn comparison_view(left: &PlayerSnapshot, right: &PlayerSnapshot, level: LevelFilter) -> ComparisonView {
    let left_stats = latest_batting(left, level);
    let right_stats = latest_batting(right, level);
    let left_ratings = left.ratings.as_ref().map(PlayerRatings::comparison_record);
    let right_ratings = right.ratings.as_ref().map(PlayerRatings::comparison_record);
    assemble_comparison(
        ComparisonSide {
            stats: left_stats.as_ref(),
            ratings: left_ratings.as_ref(),
            prediction: left.prediction.as_ref(),
        },
        ComparisonSide {
            stats: right_stats.as_ref(),
            ratings: right_ratings.as_ref(),
            prediction: right.prediction.as_ref(),
        },
    )
}

// ---------------------------------------------------------------------------
// Text tables
// ---------------------------------------------------------------------------

/// Left-aligned columns separated by two spaces, with a dashed rule under the
/// header. Widths count characters, not bytes.
pub fn render_table<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut out = String::new();
    out.push_str(&aligned_line(headers.iter().map(|h| h.as_ref()), &widths));
    out.push('\n');
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&aligned_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn aligned_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

pub fn render_stats(view: &StatsView) -> String {
    let mut out = String::new();
    let options: Vec<&str> = view.levels.iter().map(LevelFilter::display_label).collect();
    out.push_str(&format!("Level: {} (available: {})\n", view.level.display_label(), options.join(", ")));
    for table in &view.tables {
        out.push_str(&format!("\n{}\n", table.kind.title()));
        if table.is_empty() {
            out.push_str("No stats available.\n");
        } else {
            out.push_str(&render_table(table.headers.as_slice(), &table.rows));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

fn render_record(out: &mut String, title: &str, record: &RatingRecord) {
    out.push_str(&format!(
        "{title}: overall {} ({}), potential {}, confidence {}\n",
        to_fixed(record.overall_rating, 1),
        RatingBand::of(record.overall_rating).label(),
        to_fixed(record.potential_rating, 1),
        to_fixed(record.confidence_score, 1),
    ));
    let rows: Vec<Vec<String>> = record
        .radar()
        .iter()
        .map(|p| {
            vec![
                p.attribute.to_string(),
                to_fixed(p.value, 1),
                RatingBand::of(p.value).label().to_string(),
            ]
        })
        .collect();
    out.push_str(&render_table(&["Attribute", "Grade", "Band"], &rows));
}

pub fn render_ratings(ratings: Option<&PlayerRatings>) -> String {
    let mut out = String::new();
    match ratings {
        None => out.push_str("No ratings available.\n"),
        Some(PlayerRatings::SingleRole(record)) => {
            let kind = record.player_type.as_deref().unwrap_or("unknown");
            render_record(&mut out, &format!("Ratings ({kind})"), record);
        }
        Some(PlayerRatings::TwoWay(two_way)) => {
            out.push_str(&format!(
                "Two-way player: overall {} ({})\n\n",
                to_fixed(two_way.overall_rating, 1),
                RatingBand::of(two_way.overall_rating).label()
            ));
            render_record(&mut out, "Hitting", &two_way.hitting);
            out.push('\n');
            render_record(&mut out, "Pitching", &two_way.pitching);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

pub fn trend_chart(snapshot: &PlayerSnapshot) -> TrendChart {
    merge_trends(&snapshot.history.primary, snapshot.history.pitching.as_deref())
}

pub fn render_trends(chart: &TrendChart) -> String {
    let cell = |v: Option<f64>| v.map(|v| to_fixed(v, 1)).unwrap_or_else(|| "-".to_string());
    match chart {
        TrendChart::Empty => "No historical ratings available.\n".to_string(),
        TrendChart::Overall(points) => {
            let rows: Vec<Vec<String>> = points
                .iter()
                .map(|p| vec![p.season.to_string(), cell(Some(p.overall))])
                .collect();
            render_table(&["Season", "Overall"], &rows)
        }
        TrendChart::Split(points) => {
            let rows: Vec<Vec<String>> = points
                .iter()
                .map(|p| vec![p.season.to_string(), cell(p.hitting), cell(p.pitching)])
                .collect();
            render_table(&["Season", "Hitting", "Pitching"], &rows)
        }
    }
}

// ---------------------------------------------------------------------------
// Prediction and comps
// ---------------------------------------------------------------------------

pub fn render_prediction(prediction: Option<&Prediction>) -> String {
    let Some(p) = prediction else {
        return "No prediction available.\n".to_string();
    };
    let mut out = String::new();
    if let Some(headline) = p.headline() {
        out.push_str(&format!(
            "{}: {} ({})\n",
            headline.kind.title(),
            headline.percent(),
            headline.band().label()
        ));
    }
    if let Some(war) = p.projected_career_war {
        out.push_str(&format!(
            "Projected Career WAR: {} ({})\n",
            to_fixed(war, 1),
            p.war_label().unwrap_or(MISSING)
        ));
    }
    if let Some(war) = p.current_career_war {
        out.push_str(&format!("Current Career WAR: {}\n", to_fixed(war, 1)));
    }
    out.push_str(&format!("MLB Debut: {}\n", p.debut_display()));
    if let (Some(level), Some(raw)) = (p.risk(), p.risk_factor.as_deref()) {
        out.push_str(&format!("Risk Factor: {raw} ({})\n", level.label()));
    }
    out.push_str(&format!("Ceiling: {}\n", p.ceiling_comparison.as_deref().unwrap_or(MISSING)));
    out.push_str(&format!("Floor: {}\n", p.floor_comparison.as_deref().unwrap_or(MISSING)));
    out
}

pub fn render_comps(comps: &[MlbComp]) -> String {
    if comps.is_empty() {
        return "No MLB comparisons available.\n".to_string();
    }
    let rows: Vec<Vec<String>> = comps
        .iter()
        .map(|c| {
            vec![
                c.mlb_player_name.clone(),
                c.team.clone().unwrap_or_default(),
                c.similarity_percent(),
                c.similarity_label().to_string(),
                c.comparison_reason.clone(),
            ]
        })
        .collect();
    render_table(&["Player", "Team", "Similarity", "", "Reason"], &rows)
}

// ---------------------------------------------------------------------------
// Directory and comparison
// ---------------------------------------------------------------------------

pub fn render_players(players: &[&PlayerSummary]) -> String {
    let rows: Vec<Vec<String>> = players
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.full_name.clone(),
                p.team.clone().unwrap_or_else(|| MISSING.to_string()),
                p.level.clone().unwrap_or_default(),
                p.primary_position.clone().unwrap_or_default(),
            ]
        })
        .collect();
    let mut out = format!("Players ({})\n", players.len());
    out.push_str(&render_table(&["ID", "Name", "Team", "Level", "Pos"], &rows));
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn render_section(out: &mut String, title: &str, names: (&str, &str), rows: &[ComparisonRow], width: usize) {
    // Label column gets a third of the width, each player a third.
    let col = (width / 3).max(6);
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                truncate(&r.label, col),
                truncate(&r.player1, col),
                truncate(&r.player2, col),
            ]
        })
        .collect();
    out.push_str(&format!("\n{title}\n"));
    let headers = [title.to_string(), truncate(names.0, col), truncate(names.1, col)];
    out.push_str(&render_table(&headers, &cells));
}

pub fn render_comparison(view: &ComparisonView, names: (&str, &str), width: usize) -> String {
    let mut out = String::new();
    render_section(&mut out, "Stats", names, &view.stats, width);
    render_section(&mut out, "Ratings", names, &view.ratings, width);
    render_section(&mut out, "Predictions", names, &view.predictions, width);
    out
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fieldglass_core::level::CompetitionTier;
    use fieldglass_core::reconcile::reconcile_response;
    use fieldglass_core::trend::history_from_response;
    use serde_json::json;

    fn snapshot() -> PlayerSnapshot {
        let ratings = json!({
            "grades": { "contact_left": 60, "contact_right": 64, "speed": 71 },
            "player_type": "position_player",
            "overall_rating": 66.5,
            "historical_overalls": [{ "season": 2022, "overall": 61 }, { "season": 2023, "overall": 66.5 }]
        });
        PlayerSnapshot {
            player_id: 9,
            bio: None,
            batting: vec![
                SeasonRecord::new(2023, "AL").with_team("SEA").with_stat("ba", 0.251),
                SeasonRecord::new(2022, "PCL").with_team("TAC").with_stat("ba", 0.302),
                SeasonRecord::new(2023, "PCL").with_team("TAC").with_stat("ba", 0.288),
            ],
            pitching: Vec::new(),
            fielding: vec![SeasonRecord::new(2022, "PCL").with_stat("pos", "SS")],
            ratings: Some(reconcile_response(&ratings)),
            history: history_from_response(&ratings),
            prediction: None,
            comps: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn stats_view_filters_every_table() {
        let view = stats_view(&snapshot(), LevelFilter::Tier(CompetitionTier::Aaa));
        assert_eq!(view.levels, vec![
            LevelFilter::All,
            LevelFilter::Tier(CompetitionTier::Aaa),
            LevelFilter::Tier(CompetitionTier::Mlb),
        ]);
        assert_eq!(view.tables[0].rows.len(), 2);
        assert_eq!(view.tables[0].rows[0][0], "2022");
        assert!(view.tables[1].is_empty());
        assert_eq!(view.tables[2].rows.len(), 1);

        let text = render_stats(&view);
        assert!(text.contains("Level: AAA"));
        assert!(text.contains("No stats available."));
    }

    #[test]
    fn latest_batting_respects_level() {
        let snap = snapshot();
        let all = latest_batting(&snap, LevelFilter::All).unwrap();
        // Same season: the ladder puts AAA before MLB, so the first of the
        // 2023 lines after ordering is the PCL one.
        assert_eq!(all.league.as_deref(), Some("PCL"));
        let mlb = latest_batting(&snap, LevelFilter::Tier(CompetitionTier::Mlb)).unwrap();
        assert_eq!(mlb.team.as_deref(), Some("SEA"));
        assert!(latest_batting(&snap, LevelFilter::Tier(CompetitionTier::Ncaa)).is_none());
    }

    #[test]
    fn comparison_uses_level_filtered_latest_season() {
        let left = snapshot();
        let mut right = snapshot();
        right.ratings = None;
        let view = comparison_view(&left, &right, LevelFilter::Tier(CompetitionTier::Mlb));
        let ba = view.stats.iter().find(|r| r.key == "ba").unwrap();
        assert_eq!(ba.player1, "25.1%");
        let overall = view.ratings.iter().find(|r| r.key == "overall_rating").unwrap();
        assert_eq!(overall.player1, "66.5");
        assert_eq!(overall.player2, "N/A");

        let text = render_comparison(&view, ("Left", "Right"), 72);
        assert!(text.contains("Predictions"));
        assert!(text.contains("OVERALL RATING"));
    }

    #[test]
    fn table_alignment() {
        let text = render_table(&["A", "Long header"], &[vec!["wide cell".into(), "x".into()]]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "A          Long header");
        assert_eq!(lines[1], "---------  -----------");
        assert_eq!(lines[2], "wide cell  x");
    }

    #[test]
    fn trends_render() {
        let snap = snapshot();
        let text = render_trends(&trend_chart(&snap));
        assert!(text.starts_with("Season  Overall"));
        assert!(text.contains("2023    66.5"));
        assert_eq!(render_trends(&TrendChart::Empty), "No historical ratings available.\n");
    }

    #[test]
    fn ratings_render() {
        let snap = snapshot();
        let text = render_ratings(snap.ratings.as_ref());
        assert!(text.starts_with("Ratings (position_player): overall 66.5 (Average)"));
        assert!(text.contains("Contact    62.0   Average"));
        assert_eq!(render_ratings(None), "No ratings available.\n");
    }

    #[test]
    fn prediction_render() {
        let prediction = Prediction::from(json!({
            "mlb_debut_probability": 0.83,
            "projected_career_war": 12.3,
            "eta_mlb": 2025,
            "risk_factor": "Low"
        }));
        let text = render_prediction(Some(&prediction));
        assert!(text.contains("MLB Debut Probability: 83% (Strong)"));
        assert!(text.contains("Projected Career WAR: 12.3 (All-Star Level)"));
        assert!(text.contains("MLB Debut: 2025"));
        assert!(text.contains("Risk Factor: Low (low)"));
        assert!(text.contains("Floor: N/A"));
    }

    #[test]
    fn prediction_render_one_line_per_field() {
        let prediction = Prediction::from(json!({
            "hall_of_fame_probability": 0.125,
            "current_career_war": 3.25,
            "ceiling_comparison": "Dansby Swanson"
        }));
        let expected = format!(
            "Hall of Fame Probability: 13% (Unlikely)\n\
             Current Career WAR: 3.3\n\
             MLB Debut: {}\n\
             Ceiling: Dansby Swanson\n\
             Floor: N/A\n",
            fieldglass_core::prediction::NO_DEBUT
        );
        assert_eq!(render_prediction(Some(&prediction)), expected);
        assert_eq!(render_prediction(None), "No prediction available.\n");
    }

    #[test]
    fn long_cells_truncate() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
