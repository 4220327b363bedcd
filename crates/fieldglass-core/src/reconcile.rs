// Single-role vs two-way rating reconciliation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::defaults::coalesce_number;
use crate::ratings::{normalize, PlayerType, RatingRecord};

/// Ratings for one player, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlayerRatings {
    SingleRole(RatingRecord),
    TwoWay(TwoWayRatings),
}

/// Independently rated hitting and pitching profiles with one reconciled
/// overall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoWayRatings {
    pub hitting: RatingRecord,
    pub pitching: RatingRecord,
    pub player_type: PlayerType,
    pub overall_rating: f64,
}

impl PlayerRatings {
    pub fn overall(&self) -> f64 {
        match self {
            PlayerRatings::SingleRole(r) => r.overall_rating,
            PlayerRatings::TwoWay(t) => t.overall_rating,
        }
    }

    /// Player-type tag as shown to users; free-form for single-role players.
    pub fn player_type(&self) -> Option<&str> {
        match self {
            PlayerRatings::SingleRole(r) => r.player_type.as_deref(),
            PlayerRatings::TwoWay(_) => Some(PlayerType::TwoWay.tag()),
        }
    }

    /// The record used for side-by-side hitter comparisons. Two-way players
    /// compare on their hitting profile carrying the reconciled overall.
    pub fn comparison_record(&self) -> RatingRecord {
        match self {
            PlayerRatings::SingleRole(r) => r.clone(),
            PlayerRatings::TwoWay(t) => RatingRecord {
                overall_rating: t.overall_rating,
                ..t.hitting.clone()
            },
        }
    }
}

/// Reconcile a grade object. Both `hitting` and `pitching` objects present
/// means a two-way player: each side is normalized on its own and the overall
/// is the hitting overall, else the pitching overall, else 0. Anything else is
/// normalized flat against `context`.
///
/// A two-way object already tagged `player_type: "two_way"` with a top-level
/// `overall_rating` (the serialized form of [`TwoWayRatings`]) keeps that
/// overall, so reconciling a reconciled value changes nothing.
pub fn reconcile(grades: &Value, context: &Value) -> PlayerRatings {
    match (role_grades(grades, "hitting"), role_grades(grades, "pitching")) {
        (Some(hitting), Some(pitching)) => {
            let overall_rating = reconciled_overall(grades)
                .or_else(|| coalesce_number(&[hitting], "overall_rating"))
                .or_else(|| coalesce_number(&[pitching], "overall_rating"))
                .unwrap_or(0.0);
            debug!(overall_rating, "reconciled two-way grades");
            PlayerRatings::TwoWay(TwoWayRatings {
                hitting: normalize(hitting, &Value::Null),
                pitching: normalize(pitching, &Value::Null),
                player_type: PlayerType::TwoWay,
                overall_rating,
            })
        }
        _ => PlayerRatings::SingleRole(normalize(grades, context)),
    }
}

/// Reconcile a full ratings response. A response carrying a `grades` object
/// uses its top level as context; otherwise the response is itself the flat
/// grade object.
pub fn reconcile_response(response: &Value) -> PlayerRatings {
    match response.get("grades").filter(|g| g.is_object()) {
        Some(grades) => reconcile(grades, response),
        None => reconcile(response, &Value::Null),
    }
}

fn reconciled_overall(grades: &Value) -> Option<f64> {
    let tagged = grades.get("player_type").and_then(Value::as_str) == Some(PlayerType::TwoWay.tag());
    if tagged {
        coalesce_number(&[grades], "overall_rating")
    } else {
        None
    }
}

fn role_grades<'a>(grades: &'a Value, role: &str) -> Option<&'a Value> {
    grades.get(role).filter(|v| v.is_object())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
