// Player directory: summary records and the search/level filter.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::MISSING;
use crate::level::LevelFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: i64,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_position: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bats: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throws: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debut_date: Option<String>,
}

impl PlayerSummary {
    /// "Name (Team)", with N/A for a missing team.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.full_name, self.team.as_deref().unwrap_or(MISSING))
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.full_name.to_lowercase().contains(needle)
            || self
                .team
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(needle))
    }

    fn matches_level(&self, filter: LevelFilter) -> bool {
        match filter {
            LevelFilter::All => true,
            LevelFilter::Tier(tier) => self
                .level
                .as_deref()
                .is_some_and(|l| l.eq_ignore_ascii_case(tier.label())),
        }
    }
}

/// Players whose name or team contains `search` (case-insensitive) and whose
/// level matches `level`. An empty search matches everyone.
pub fn filter_players<'a>(
    players: &'a [PlayerSummary],
    search: &str,
    level: LevelFilter,
) -> Vec<&'a PlayerSummary> {
    let needle = search.to_lowercase();
    players
        .iter()
        .filter(|p| p.matches_search(&needle) && p.matches_level(level))
        .collect()
}

/// Decode a directory response, skipping entries without an id or name.
pub fn players_from_json(value: Value) -> Vec<PlayerSummary> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}
