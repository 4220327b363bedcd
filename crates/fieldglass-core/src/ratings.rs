// Rating normalization: repairs the shape of a remote grade payload into a
// fully defaulted RatingRecord. Ratings themselves are never computed here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::defaults::{coalesce_number, coalesce_str, number_or};

// ---------------------------------------------------------------------------
// PlayerType
// ---------------------------------------------------------------------------

/// Parsed view of the free-form `player_type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerType {
    Pitcher,
    PositionPlayer,
    Dh,
    TwoWay,
}

impl PlayerType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "pitcher" => Some(PlayerType::Pitcher),
            "position_player" => Some(PlayerType::PositionPlayer),
            "dh" => Some(PlayerType::Dh),
            "two_way" => Some(PlayerType::TwoWay),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            PlayerType::Pitcher => "pitcher",
            PlayerType::PositionPlayer => "position_player",
            PlayerType::Dh => "dh",
            PlayerType::TwoWay => "two_way",
        }
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// RatingRecord
// ---------------------------------------------------------------------------

/// A normalized skill profile. Core fields always hold a number; pitcher tool
/// grades stay absent when the payload does not carry them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingRecord {
    pub contact_left: f64,
    pub contact_right: f64,
    pub power_left: f64,
    pub power_right: f64,
    pub vision: f64,
    pub discipline: f64,
    pub fielding: f64,
    pub arm_strength: f64,
    pub arm_accuracy: f64,
    pub speed: f64,
    pub stealing: f64,
    pub overall_rating: f64,
    pub potential_rating: f64,
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bb_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gb_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leverage_rating: Option<f64>,
}

/// Core numeric fields, defaulted to 0.
pub const CORE_FIELDS: [&str; 14] = [
    "contact_left",
    "contact_right",
    "power_left",
    "power_right",
    "vision",
    "discipline",
    "fielding",
    "arm_strength",
    "arm_accuracy",
    "speed",
    "stealing",
    "overall_rating",
    "potential_rating",
    "confidence_score",
];

/// Pitcher tool grades, left absent when missing.
pub const PITCHER_FIELDS: [&str; 7] = [
    "k_rating",
    "bb_rating",
    "gb_rating",
    "hr_rating",
    "command_rating",
    "durability_rating",
    "leverage_rating",
];

impl RatingRecord {
    /// Numeric field by payload key. Absent pitcher grades and unknown keys
    /// are `None`.
    pub fn field(&self, key: &str) -> Option<f64> {
        let value = match key {
            "contact_left" => self.contact_left,
            "contact_right" => self.contact_right,
            "power_left" => self.power_left,
            "power_right" => self.power_right,
            "vision" => self.vision,
            "discipline" => self.discipline,
            "fielding" => self.fielding,
            "arm_strength" => self.arm_strength,
            "arm_accuracy" => self.arm_accuracy,
            "speed" => self.speed,
            "stealing" => self.stealing,
            "overall_rating" => self.overall_rating,
            "potential_rating" => self.potential_rating,
            "confidence_score" => self.confidence_score,
            "k_rating" => return self.k_rating,
            "bb_rating" => return self.bb_rating,
            "gb_rating" => return self.gb_rating,
            "hr_rating" => return self.hr_rating,
            "command_rating" => return self.command_rating,
            "durability_rating" => return self.durability_rating,
            "leverage_rating" => return self.leverage_rating,
            _ => return None,
        };
        Some(value)
    }

    pub fn kind(&self) -> Option<PlayerType> {
        self.player_type.as_deref().and_then(PlayerType::from_tag)
    }

    pub fn contact(&self) -> f64 {
        (self.contact_left + self.contact_right) / 2.0
    }

    pub fn power(&self) -> f64 {
        (self.power_left + self.power_right) / 2.0
    }

    pub fn arm(&self) -> f64 {
        (self.arm_strength + self.arm_accuracy) / 2.0
    }

    /// Radar-chart attributes for this player's role. Pitchers chart their
    /// tool grades, designated hitters their bat only, everyone else the full
    /// position-player profile (unknown tags included).
    pub fn radar(&self) -> Vec<RadarPoint> {
        let point = |attribute: &'static str, value: f64| RadarPoint { attribute, value };
        match self.kind() {
            Some(PlayerType::Pitcher) => vec![
                point("K", self.k_rating.unwrap_or(0.0)),
                point("BB", self.bb_rating.unwrap_or(0.0)),
                point("GB", self.gb_rating.unwrap_or(0.0)),
                point("HR", self.hr_rating.unwrap_or(0.0)),
                point("Command", self.command_rating.unwrap_or(0.0)),
            ],
            Some(PlayerType::Dh) => vec![
                point("Contact", self.contact()),
                point("Power", self.power()),
                point("Vision", self.vision),
                point("Discipline", self.discipline),
            ],
            _ => vec![
                point("Contact", self.contact()),
                point("Power", self.power()),
                point("Vision", self.vision),
                point("Speed", self.speed),
                point("Fielding", self.fielding),
                point("Arm", self.arm()),
            ],
        }
    }
}

/// One spoke of a radar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarPoint {
    pub attribute: &'static str,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a grade payload. Each field resolves as the grade value, else
/// the same key in `context` (the enclosing ratings response, which carries
/// overall/potential/confidence/player_type for single-role players), else
/// the default. Never fails; a non-object payload reads as empty.
pub fn normalize(grades: &Value, context: &Value) -> RatingRecord {
    let sources = [grades, context];
    let num = |key: &str| number_or(&sources, key, 0.0);
    let opt = |key: &str| coalesce_number(&sources, key);

    let record = RatingRecord {
        contact_left: num("contact_left"),
        contact_right: num("contact_right"),
        power_left: num("power_left"),
        power_right: num("power_right"),
        vision: num("vision"),
        discipline: num("discipline"),
        fielding: num("fielding"),
        arm_strength: num("arm_strength"),
        arm_accuracy: num("arm_accuracy"),
        speed: num("speed"),
        stealing: num("stealing"),
        overall_rating: num("overall_rating"),
        potential_rating: num("potential_rating"),
        confidence_score: num("confidence_score"),
        player_type: coalesce_str(&sources, "player_type"),
        k_rating: opt("k_rating"),
        bb_rating: opt("bb_rating"),
        gb_rating: opt("gb_rating"),
        hr_rating: opt("hr_rating"),
        command_rating: opt("command_rating"),
        durability_rating: opt("durability_rating"),
        leverage_rating: opt("leverage_rating"),
    };
    debug!(
        player_type = record.player_type.as_deref().unwrap_or("-"),
        overall = record.overall_rating,
        "normalized grade payload"
    );
    record
}

// ---------------------------------------------------------------------------
// Rating bands
// ---------------------------------------------------------------------------

/// Coarse quality band for a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    Elite,
    VeryGood,
    Good,
    Average,
    BelowAverage,
}

impl RatingBand {
    pub fn of(rating: f64) -> Self {
        if rating >= 90.0 {
            RatingBand::Elite
        } else if rating >= 80.0 {
            RatingBand::VeryGood
        } else if rating >= 70.0 {
            RatingBand::Good
        } else if rating >= 60.0 {
            RatingBand::Average
        } else {
            RatingBand::BelowAverage
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingBand::Elite => "Elite",
            RatingBand::VeryGood => "Very Good",
            RatingBand::Good => "Good",
            RatingBand::Average => "Average",
            RatingBand::BelowAverage => "Below Average",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
