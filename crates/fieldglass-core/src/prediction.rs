// MLB outcome predictions and their presentation helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::present;
use crate::format::{to_fixed, CellValue};

/// Placeholder shown when no debut information exists.
pub const NO_DEBUT: &str = "—";

/// Prediction payload for one prospect. Every field is optional; a field of
/// the wrong type reads as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Prediction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mlb_debut_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall_of_fame_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_career_war: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_career_war: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling_comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_mlb: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debut_year: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debut_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_factor: Option<String>,
}

impl From<Value> for Prediction {
    fn from(value: Value) -> Self {
        let number = |key: &str| present(value.get(key)).and_then(Value::as_f64);
        let text = |key: &str| present(value.get(key)).and_then(Value::as_str).map(str::to_string);
        let cell = |key: &str| present(value.get(key)).and_then(CellValue::from_json);
        Prediction {
            mlb_debut_probability: number("mlb_debut_probability"),
            hall_of_fame_probability: number("hall_of_fame_probability"),
            projected_career_war: number("projected_career_war"),
            current_career_war: number("current_career_war"),
            ceiling_comparison: text("ceiling_comparison"),
            floor_comparison: text("floor_comparison"),
            eta_mlb: cell("eta_mlb"),
            debut_year: cell("debut_year"),
            debut_date: text("debut_date"),
            risk_factor: text("risk_factor"),
        }
    }
}

impl Prediction {
    pub fn is_empty(&self) -> bool {
        *self == Prediction::default()
    }

    /// Field by payload key as a display cell.
    pub fn cell(&self, key: &str) -> Option<CellValue> {
        let text = |s: &Option<String>| s.as_deref().map(CellValue::from);
        match key {
            "mlb_debut_probability" => self.mlb_debut_probability.map(CellValue::Number),
            "hall_of_fame_probability" => self.hall_of_fame_probability.map(CellValue::Number),
            "projected_career_war" => self.projected_career_war.map(CellValue::Number),
            "current_career_war" => self.current_career_war.map(CellValue::Number),
            "ceiling_comparison" => text(&self.ceiling_comparison),
            "floor_comparison" => text(&self.floor_comparison),
            "eta_mlb" => self.eta_mlb.clone(),
            "debut_year" => self.debut_year.clone(),
            "debut_date" => text(&self.debut_date),
            "risk_factor" => text(&self.risk_factor),
            _ => None,
        }
    }

    /// The probability that leads the prediction card: Hall of Fame when the
    /// model produced one, MLB debut otherwise.
    pub fn headline(&self) -> Option<Headline> {
        if let Some(p) = self.hall_of_fame_probability {
            return Some(Headline {
                kind: HeadlineKind::HallOfFame,
                probability: p,
            });
        }
        self.mlb_debut_probability.map(|p| Headline {
            kind: HeadlineKind::MlbDebut,
            probability: p,
        })
    }

    /// First truthy of debut year, ETA and debut date.
    pub fn debut_display(&self) -> String {
        let truthy_cell = |c: &Option<CellValue>| {
            c.as_ref()
                .filter(|c| match c {
                    CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
                    CellValue::Text(s) => !s.is_empty(),
                })
                .map(CellValue::plain)
        };
        truthy_cell(&self.debut_year)
            .or_else(|| truthy_cell(&self.eta_mlb))
            .or_else(|| self.debut_date.clone().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| NO_DEBUT.to_string())
    }

    /// Risk chip; `None` when no risk factor was given.
    pub fn risk(&self) -> Option<RiskLevel> {
        self.risk_factor
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(RiskLevel::parse)
    }

    pub fn war_label(&self) -> Option<&'static str> {
        self.projected_career_war.map(war_label)
    }
}

// ---------------------------------------------------------------------------
// Headline probability
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadlineKind {
    HallOfFame,
    MlbDebut,
}

impl HeadlineKind {
    pub fn title(&self) -> &'static str {
        match self {
            HeadlineKind::HallOfFame => "Hall of Fame Probability",
            HeadlineKind::MlbDebut => "MLB Debut Probability",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Headline {
    pub kind: HeadlineKind,
    pub probability: f64,
}

impl Headline {
    pub fn percent(&self) -> String {
        round_percent(self.probability)
    }

    pub fn band(&self) -> ProbabilityBand {
        ProbabilityBand::of(self.probability)
    }
}

/// Fraction as a whole percentage, halves rounded up: 0.125 → "13%".
pub fn round_percent(fraction: f64) -> String {
    let rounded = (fraction * 100.0 + 0.5).floor();
    format!("{}%", to_fixed(rounded, 0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityBand {
    Strong,
    Favorable,
    Uncertain,
    Unlikely,
}

impl ProbabilityBand {
    pub fn of(probability: f64) -> Self {
        if probability >= 0.8 {
            ProbabilityBand::Strong
        } else if probability >= 0.6 {
            ProbabilityBand::Favorable
        } else if probability >= 0.4 {
            ProbabilityBand::Uncertain
        } else {
            ProbabilityBand::Unlikely
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProbabilityBand::Strong => "Strong",
            ProbabilityBand::Favorable => "Favorable",
            ProbabilityBand::Uncertain => "Uncertain",
            ProbabilityBand::Unlikely => "Unlikely",
        }
    }
}

// ---------------------------------------------------------------------------
// WAR and risk
// ---------------------------------------------------------------------------

pub fn war_label(war: f64) -> &'static str {
    if war >= 20.0 {
        "Hall of Fame Caliber"
    } else if war >= 10.0 {
        "All-Star Level"
    } else if war >= 5.0 {
        "Good Regular"
    } else if war >= 0.0 {
        "Average Player"
    } else {
        "Below Average"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unrated,
}

impl RiskLevel {
    pub fn parse(risk: &str) -> Self {
        match risk.to_ascii_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unrated,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unrated => "unrated",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
