// Level filtering and chronological ordering of season stat lines.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::level::{CompetitionTier, LevelFilter};
use crate::season::SeasonRecord;

/// Filter `records` to a level and order them oldest season first.
///
/// With [`LevelFilter::All`] the slice itself is sorted in place (season, then
/// tier ladder rank, unladdered tiers first) and every record is returned, so
/// the caller's collection is reordered. Clone beforehand to keep the original
/// order.
///
/// With a specific tier the slice is left untouched: records whose league
/// belongs to that tier are selected and ordered by season alone. The sort is
/// stable, so records sharing a season keep their relative input order.
pub fn filter_and_order<'a>(
    records: &'a mut [SeasonRecord],
    filter: LevelFilter,
) -> Vec<&'a SeasonRecord> {
    match filter {
        LevelFilter::All => {
            records.sort_by(compare_all_levels);
            records.iter().collect()
        }
        LevelFilter::Tier(tier) => {
            let leagues = tier.leagues();
            let mut selected: Vec<&SeasonRecord> = records
                .iter()
                .filter(|r| {
                    r.league
                        .as_deref()
                        .is_some_and(|lg| leagues.contains(&lg))
                })
                .collect();
            selected.sort_by_key(|r| r.season_number());
            selected
        }
    }
}

/// Owned convenience over [`filter_and_order`] for callers that want to keep
/// their input order.
pub fn filtered_copy(records: &[SeasonRecord], filter: LevelFilter) -> Vec<SeasonRecord> {
    let mut scratch = records.to_vec();
    filter_and_order(&mut scratch, filter)
        .into_iter()
        .cloned()
        .collect()
}

fn compare_all_levels(a: &SeasonRecord, b: &SeasonRecord) -> Ordering {
    a.season_number()
        .cmp(&b.season_number())
        .then_with(|| a.tier().ladder_rank().cmp(&b.tier().ladder_rank()))
}

/// Level options for a player's stat views: `All` first, then each distinct
/// classified tier present in any of the collections, sorted by label.
/// Unclassifiable league codes contribute nothing.
pub fn available_levels<'a, I>(records: I) -> Vec<LevelFilter>
where
    I: IntoIterator<Item = &'a SeasonRecord>,
{
    let by_label: BTreeMap<&'static str, CompetitionTier> = records
        .into_iter()
        .filter_map(|r| r.league.as_deref().filter(|lg| !lg.is_empty()))
        .map(|lg| CompetitionTier::classify(Some(lg)))
        .filter(|tier| *tier != CompetitionTier::Unknown)
        .map(|tier| (tier.label(), tier))
        .collect();

    let mut levels = vec![LevelFilter::All];
    levels.extend(by_label.into_values().map(LevelFilter::Tier));
    levels
}

/// The record with the highest season. Among records sharing that season the
/// earliest in input order wins.
pub fn latest_season(records: &[SeasonRecord]) -> Option<&SeasonRecord> {
    records.iter().fold(None, |best: Option<&SeasonRecord>, r| match best {
        Some(b) if b.season_number() >= r.season_number() => Some(b),
        _ => Some(r),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(season: i64, lg: &str) -> SeasonRecord {
        SeasonRecord::new(season, lg)
    }

    fn key(r: &SeasonRecord) -> (i64, String) {
        (r.season_number(), r.league.clone().unwrap_or_default())
    }

    #[test]
    fn specific_tier_filters_and_sorts() {
        let mut records = vec![rec(2021, "PCL"), rec(2019, "IL"), rec(2020, "AL")];
        let out: Vec<_> = filter_and_order(&mut records, LevelFilter::Tier(CompetitionTier::Aaa))
            .into_iter()
            .map(key)
            .collect();
        assert_eq!(out, vec![(2019, "IL".into()), (2021, "PCL".into())]);
    }

    #[test]
    fn specific_tier_leaves_input_order() {
        let mut records = vec![rec(2021, "PCL"), rec(2019, "IL")];
        let _ = filter_and_order(&mut records, LevelFilter::Tier(CompetitionTier::Aaa));
        assert_eq!(records[0].season_number(), 2021);
    }

    #[test]
    fn all_sorts_in_place_by_season_then_ladder() {
        let mut records = vec![
            rec(2020, "AL"),
            rec(2019, "EL"),
            rec(2020, "PCL"),
            rec(2020, "GULF"),
            rec(2019, "MIDW"),
        ];
        let ordered: Vec<_> = filter_and_order(&mut records, LevelFilter::All)
            .into_iter()
            .map(key)
            .collect();
        let expected = vec![
            (2019, "MIDW".to_string()),
            (2019, "EL".to_string()),
            (2020, "GULF".to_string()),
            (2020, "PCL".to_string()),
            (2020, "AL".to_string()),
        ];
        assert_eq!(ordered, expected);
        // The caller's slice was reordered too.
        let in_place: Vec<_> = records.iter().map(key).collect();
        assert_eq!(in_place, expected);
    }

    #[test]
    fn unladdered_tiers_come_first_within_a_season() {
        let mut records = vec![rec(2018, "AL"), rec(2018, "NCAA"), rec(2018, "XYZ"), rec(2018, "ARIZ")];
        let ordered: Vec<_> = filter_and_order(&mut records, LevelFilter::All)
            .into_iter()
            .map(|r| r.league.clone().unwrap())
            .collect();
        assert_eq!(ordered, vec!["NCAA", "XYZ", "ARIZ", "AL"]);
    }

    #[test]
    fn unparseable_seasons_sort_first() {
        let mut records = vec![
            rec(2017, "AL"),
            SeasonRecord::new("career", "AL"),
            SeasonRecord::new("2016", "AL"),
        ];
        let seasons: Vec<_> = filter_and_order(&mut records, LevelFilter::All)
            .into_iter()
            .map(SeasonRecord::season_number)
            .collect();
        assert_eq!(seasons, vec![0, 2016, 2017]);
    }

    #[test]
    fn all_is_a_permutation() {
        let mut records = vec![rec(2022, "SL"), rec(2021, "AL"), rec(2022, "AL"), rec(2021, "HS")];
        let before = records.clone();
        let out = filter_and_order(&mut records, LevelFilter::All);
        assert_eq!(out.len(), before.len());
        for r in &before {
            assert!(out.iter().any(|o| *o == r));
        }
        assert!(out.windows(2).all(|w| w[0].season_number() <= w[1].season_number()));
    }

    #[test]
    fn ordering_is_idempotent() {
        let mut records = vec![rec(2022, "SL"), rec(2021, "AL"), rec(2022, "AL")];
        let first: Vec<SeasonRecord> = filter_and_order(&mut records, LevelFilter::All)
            .into_iter()
            .cloned()
            .collect();
        let mut again = first.clone();
        let second: Vec<SeasonRecord> = filter_and_order(&mut again, LevelFilter::All)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_tier_selects_nothing() {
        let mut records = vec![rec(2020, "XYZ"), rec(2020, "AL")];
        assert!(filter_and_order(&mut records, LevelFilter::Tier(CompetitionTier::Unknown)).is_empty());
    }

    #[test]
    fn rookie_excludes_pion() {
        let mut records = vec![rec(2020, "PION"), rec(2019, "ARIZ")];
        let rookie = filter_and_order(&mut records, LevelFilter::Tier(CompetitionTier::Rookie));
        assert_eq!(rookie.len(), 1);
        assert_eq!(rookie[0].league.as_deref(), Some("ARIZ"));
    }

    #[test]
    fn filtered_copy_keeps_input() {
        let records = vec![rec(2021, "AL"), rec(2019, "AL")];
        let out = filtered_copy(&records, LevelFilter::All);
        assert_eq!(out[0].season_number(), 2019);
        assert_eq!(records[0].season_number(), 2021);
    }

    #[test]
    fn available_levels_sorted_and_known_only() {
        let batting = vec![rec(2021, "AL"), rec(2019, "MIDW"), rec(2018, "XYZ")];
        let pitching = vec![rec(2020, "PCL"), SeasonRecord::new(2020, "")];
        let fielding = vec![rec(2017, "NCAA"), rec(2016, "GULF")];
        let levels = available_levels(batting.iter().chain(&pitching).chain(&fielding));
        let labels: Vec<_> = levels.iter().map(LevelFilter::as_query).collect();
        assert_eq!(labels, vec!["all", "A", "AAA", "MLB", "NCAA", "Rookie"]);
    }

    #[test]
    fn available_levels_for_no_stats_is_all_only() {
        let none: Vec<SeasonRecord> = Vec::new();
        assert_eq!(available_levels(&none), vec![LevelFilter::All]);
    }

    #[test]
    fn latest_season_prefers_first_of_ties() {
        let records = vec![
            rec(2020, "AL").with_team("LAA"),
            rec(2022, "AL").with_team("NYY"),
            rec(2022, "NL").with_team("LAD"),
        ];
        let latest = latest_season(&records).unwrap();
        assert_eq!(latest.team.as_deref(), Some("NYY"));
        assert!(latest_season(&[]).is_none());
    }
}
