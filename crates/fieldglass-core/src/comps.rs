// Similar MLB players for a prospect.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::{coalesce_str, number_or, present};
use crate::prediction::round_percent;

/// One comparable MLB player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlbComp {
    pub mlb_player_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default)]
    pub similarity_score: f64,
    #[serde(default)]
    pub comparison_reason: String,
}

impl MlbComp {
    /// Lenient decode of one entry. Missing or null fields default; only a
    /// missing player name rejects the entry.
    pub fn from_json(value: &Value) -> Option<MlbComp> {
        let mlb_player_name = present(value.get("mlb_player_name"))?.as_str()?.to_string();
        Some(MlbComp {
            mlb_player_name,
            team: coalesce_str(&[value], "team"),
            similarity_score: number_or(&[value], "similarity_score", 0.0),
            comparison_reason: coalesce_str(&[value], "comparison_reason").unwrap_or_default(),
        })
    }

    pub fn similarity_label(&self) -> &'static str {
        similarity_label(self.similarity_score)
    }

    pub fn similarity_percent(&self) -> String {
        round_percent(self.similarity_score)
    }
}

pub fn similarity_label(score: f64) -> &'static str {
    if score >= 0.8 {
        "Very Similar"
    } else if score >= 0.6 {
        "Similar"
    } else {
        "Somewhat Similar"
    }
}

/// Decode a comps response. Non-array responses yield nothing and entries
/// without a player name are dropped.
pub fn comps_from_json(value: Value) -> Vec<MlbComp> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| MlbComp::from_json(&item))
            .collect(),
        _ => Vec::new(),
    }
}
