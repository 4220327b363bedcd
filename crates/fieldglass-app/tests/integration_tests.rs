// Integration tests for the fieldglass app layer.
//
// Everything runs against the JSON fixtures in tests/fixtures: player 1 is a
// position player with every section, player 2 is a two-way player without
// fielding stats or comps, player 3 exists only in the directory.

use fieldglass_app::export::export_stats;
use fieldglass_app::session::{PlayerSession, PlayerSnapshot};
use fieldglass_app::source::{FixtureSource, PlayerSource, Resource, Section, SourceError};
use fieldglass_app::view::{
    comparison_view, render_comps, render_prediction, render_ratings, render_stats,
    render_trends, stats_view, trend_chart,
};
use fieldglass_core::columns::StatKind;
use fieldglass_core::compare::ComparisonRow;
use fieldglass_core::directory::filter_players;
use fieldglass_core::level::CompetitionTier;
use fieldglass_core::trend::TrendChart;
use fieldglass_core::{LevelFilter, PlayerRatings};

fn fixtures() -> FixtureSource {
    FixtureSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

fn row<'a>(rows: &'a [ComparisonRow], key: &str) -> &'a ComparisonRow {
    rows.iter()
        .find(|r| r.key == key)
        .unwrap_or_else(|| panic!("no comparison row for {key}"))
}

// ===========================================================================
// Directory
// ===========================================================================

#[tokio::test]
async fn directory_skips_entries_without_id() {
    let players = fixtures().players().await.unwrap();
    assert_eq!(players.len(), 3);
    assert_eq!(players[2].display_name(), "Marcus Bell (N/A)");
}

#[tokio::test]
async fn directory_search_and_level() {
    let players = fixtures().players().await.unwrap();

    let by_name: Vec<i64> = filter_players(&players, "TAN", LevelFilter::All)
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(by_name, vec![2]);

    let by_team: Vec<i64> = filter_players(&players, "tol", LevelFilter::All)
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(by_team, vec![1]);

    let level: LevelFilter = "hs".parse().unwrap();
    let by_level: Vec<i64> = filter_players(&players, "", level).iter().map(|p| p.id).collect();
    assert_eq!(by_level, vec![3]);
}

// ===========================================================================
// Snapshots and session
// ===========================================================================

#[tokio::test]
async fn snapshot_with_every_section() {
    let snapshot = PlayerSnapshot::load(&fixtures(), 1).await;
    assert_eq!(snapshot.display_name(), "Jordan Reyes");
    assert_eq!(snapshot.batting.len(), 4);
    assert!(snapshot.pitching.is_empty());
    assert_eq!(snapshot.fielding.len(), 2);
    assert_eq!(snapshot.comps.len(), 2);
    assert!(snapshot.prediction.is_some());

    let ratings = snapshot.ratings.as_ref().unwrap();
    assert!(matches!(ratings, PlayerRatings::SingleRole(_)));
    assert!((ratings.overall() - 71.5).abs() < f64::EPSILON);
    assert_eq!(snapshot.history.primary.len(), 3);
    assert!(snapshot.history.pitching.is_none());
}

#[tokio::test]
async fn missing_sections_degrade() {
    let two_way = PlayerSnapshot::load(&fixtures(), 2).await;
    assert!(two_way.fielding.is_empty());
    assert!(two_way.comps.is_empty());
    assert_eq!(two_way.pitching.len(), 1);

    let unknown = PlayerSnapshot::load(&fixtures(), 3).await;
    assert!(unknown.bio.is_none());
    assert_eq!(unknown.display_name(), "Player 3");
    assert!(unknown.batting.is_empty());
    assert!(unknown.ratings.is_none());
    assert!(unknown.prediction.is_none());
    assert!(unknown.history.primary.is_empty());
}

#[tokio::test]
async fn source_reports_missing_fixture() {
    let err = fixtures()
        .fetch(Resource::Player(2, Section::Stats(StatKind::Fielding)))
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Fixture { .. }));
}

#[tokio::test]
async fn session_deduplicates_reselection() {
    let mut session = PlayerSession::new(fixtures());
    assert!(session.current().is_none());

    let first = session.select(1).await.unwrap().fetched_at;
    let again = session.select(1).await.unwrap().fetched_at;
    assert_eq!(first, again);

    let other = session.select(2).await.unwrap();
    assert_eq!(other.player_id, 2);

    let refreshed = session.refresh().await.unwrap();
    assert_eq!(refreshed.player_id, 2);

    session.clear();
    assert!(session.current().is_none());
    assert!(session.refresh().await.is_none());
}

// ===========================================================================
// Views
// ===========================================================================

#[tokio::test]
async fn stats_view_all_levels_and_tier() {
    let snapshot = PlayerSnapshot::load(&fixtures(), 1).await;

    let all = stats_view(&snapshot, LevelFilter::All);
    assert_eq!(
        all.levels,
        vec![
            LevelFilter::All,
            LevelFilter::Tier(CompetitionTier::A),
            LevelFilter::Tier(CompetitionTier::Aa),
            LevelFilter::Tier(CompetitionTier::Aaa),
        ]
    );
    let batting = &all.tables[0];
    assert_eq!(batting.kind, StatKind::Batting);
    assert_eq!(batting.rows.len(), 4);
    assert_eq!(batting.rows[0][0], "2022");
    assert_eq!(batting.rows[3][0], "2024");

    let aaa = stats_view(&snapshot, LevelFilter::Tier(CompetitionTier::Aaa));
    let seasons: Vec<&str> = aaa.tables[0].rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(seasons, vec!["2023", "2024"]);
    assert!(aaa.tables[1].is_empty());
    assert_eq!(aaa.tables[2].rows.len(), 1);

    let text = render_stats(&aaa);
    assert!(text.starts_with("Level: AAA (available: All Levels, A, AA, AAA)"));
    assert!(text.contains("Pitching\nNo stats available."));
}

#[tokio::test]
async fn two_way_ratings_and_trends() {
    let snapshot = PlayerSnapshot::load(&fixtures(), 2).await;
    let ratings = snapshot.ratings.as_ref().unwrap();
    assert_eq!(ratings.player_type(), Some("two_way"));
    assert!((ratings.overall() - 72.0).abs() < f64::EPSILON);

    let text = render_ratings(Some(ratings));
    assert!(text.starts_with("Two-way player: overall 72.0 (Good)"));
    assert!(text.contains("Pitching: overall 70.0 (Good)"));

    let chart = trend_chart(&snapshot);
    assert!(matches!(chart, TrendChart::Split(_)));
    assert_eq!(chart.len(), 2);
    let rendered = render_trends(&chart);
    assert!(rendered.contains("2023    64.0     -"));
    assert!(rendered.contains("2024    72.0     70.0"));
}

#[tokio::test]
async fn single_series_trend_is_sorted() {
    let snapshot = PlayerSnapshot::load(&fixtures(), 1).await;
    let chart = trend_chart(&snapshot);
    assert_eq!(
        serde_json::to_value(&chart).unwrap(),
        serde_json::json!({
            "kind": "overall",
            "rows": [
                { "season": 2022, "Overall": 61.5 },
                { "season": 2023, "Overall": 66.0 },
                { "season": 2024, "Overall": 71.5 }
            ]
        })
    );
}

#[tokio::test]
async fn prediction_and_comps_rendering() {
    let reyes = PlayerSnapshot::load(&fixtures(), 1).await;
    let text = render_prediction(reyes.prediction.as_ref());
    assert!(text.contains("MLB Debut Probability: 85% (Strong)"));
    assert!(text.contains("Projected Career WAR: 14.2 (All-Star Level)"));
    assert!(text.contains("MLB Debut: 2025"));

    let comps = render_comps(&reyes.comps);
    assert!(comps.contains("Trea Turner"));
    assert!(comps.contains("83%"));
    assert!(comps.contains("Very Similar"));
    assert!(comps.contains("Jean Segura"));
    assert!(comps.contains("64%"));
    assert!(!comps.contains("Somewhat Similar"));

    let tanaka = PlayerSnapshot::load(&fixtures(), 2).await;
    let text = render_prediction(tanaka.prediction.as_ref());
    assert!(text.starts_with("Hall of Fame Probability: 13% (Unlikely)"));
    assert!(text.contains("Risk Factor: HIGH (high)"));
    assert!(text.contains("Projected Career WAR: 24.6 (Hall of Fame Caliber)"));
    assert!(text.contains("MLB Debut: 2026"));
    assert_eq!(render_comps(&tanaka.comps), "No MLB comparisons available.\n");
}

#[tokio::test]
async fn comparison_of_fixture_players() {
    let source = fixtures();
    let (left, right) = tokio::join!(
        PlayerSnapshot::load(&source, 1),
        PlayerSnapshot::load(&source, 2)
    );
    let view = comparison_view(&left, &right, LevelFilter::All);

    let season = row(&view.stats, "season");
    assert_eq!((season.player1.as_str(), season.player2.as_str()), ("2024", "2024"));
    let team = row(&view.stats, "team");
    assert_eq!((team.player1.as_str(), team.player2.as_str()), ("TOL", "BIR"));
    let ba = row(&view.stats, "ba");
    assert_eq!(ba.label, "AVG");
    assert_eq!((ba.player1.as_str(), ba.player2.as_str()), ("28.7%", "26.2%"));
    let hr = row(&view.stats, "hr");
    assert_eq!((hr.player1.as_str(), hr.player2.as_str()), ("18.0", "12.0"));

    let overall = row(&view.ratings, "overall_rating");
    assert_eq!(overall.label, "OVERALL RATING");
    assert_eq!((overall.player1.as_str(), overall.player2.as_str()), ("71.5", "72.0"));
    let speed = row(&view.ratings, "speed");
    assert_eq!((speed.player1.as_str(), speed.player2.as_str()), ("68.0", "62.0"));

    let debut = row(&view.predictions, "mlb_debut_probability");
    assert_eq!((debut.player1.as_str(), debut.player2.as_str()), ("85.0%", "71.0%"));
    let hof = row(&view.predictions, "hall_of_fame_probability");
    assert_eq!((hof.player1.as_str(), hof.player2.as_str()), ("N/A", "12.5%"));
    let eta = row(&view.predictions, "eta_mlb");
    assert_eq!((eta.player1.as_str(), eta.player2.as_str()), ("2025", "2026"));
    let risk = row(&view.predictions, "risk_factor");
    assert_eq!((risk.player1.as_str(), risk.player2.as_str()), ("Medium", "HIGH"));
}

#[tokio::test]
async fn comparison_respects_level() {
    let source = fixtures();
    let left = PlayerSnapshot::load(&source, 1).await;
    let right = PlayerSnapshot::load(&source, 2).await;
    let view = comparison_view(&left, &right, LevelFilter::Tier(CompetitionTier::A));

    let season = row(&view.stats, "season");
    assert_eq!((season.player1.as_str(), season.player2.as_str()), ("2022", "2023"));
    let team = row(&view.stats, "team");
    assert_eq!((team.player1.as_str(), team.player2.as_str()), ("GVL", "WSM"));
}

// ===========================================================================
// Export
// ===========================================================================

#[tokio::test]
async fn export_writes_filtered_tables() {
    let snapshot = PlayerSnapshot::load(&fixtures(), 1).await;
    let view = stats_view(&snapshot, LevelFilter::Tier(CompetitionTier::Aaa));

    let dir = std::env::temp_dir().join("fieldglass_integration_export");
    let _ = std::fs::remove_dir_all(&dir);
    let written = export_stats(&dir, 1, &view).unwrap();
    assert_eq!(written.len(), 3);

    let batting = std::fs::read_to_string(dir.join("player_1_batting_aaa.csv")).unwrap();
    let lines: Vec<&str> = batting.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Season,Team,Lg,G,PA,AB"));
    assert!(lines[1].starts_with("2023,TOL,IL,58,250,222"));

    let pitching = std::fs::read_to_string(dir.join("player_1_pitching_aaa.csv")).unwrap();
    assert_eq!(pitching.lines().count(), 1);
}
