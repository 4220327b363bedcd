// Display formatting for table cells and comparison rows.

use serde::Serialize;
use serde_json::Value;

use crate::defaults::MISSING;

// ---------------------------------------------------------------------------
// CellValue
// ---------------------------------------------------------------------------

/// A displayable scalar pulled out of a loosely typed payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numbers and strings map directly, booleans become text, containers
    /// and null are not displayable.
    pub fn from_json(value: &Value) -> Option<CellValue> {
        match value {
            Value::Number(n) => n.as_f64().map(CellValue::Number),
            Value::String(s) => Some(CellValue::Text(s.clone())),
            Value::Bool(b) => Some(CellValue::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Plain rendering: numbers in shortest round-trip form, integral values
    /// without a fraction.
    pub fn plain(&self) -> String {
        match self {
            CellValue::Number(n) => plain_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

fn plain_number(n: f64) -> String {
    if n == 0.0 {
        // Avoid "-0".
        "0".to_string()
    } else {
        n.to_string()
    }
}

// ---------------------------------------------------------------------------
// Fixed precision
// ---------------------------------------------------------------------------

/// Fixed-point rendering with `digits` decimals, rounding the exact binary
/// value of `value`. Only exact decimal ties round away from zero
/// (0.125 → "0.13"); `format!` would round those to even. Values such as
/// 12.35, stored just below the tie, round down.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let rendered = match round_exact_tie(value.abs(), digits) {
        Some(magnitude) if value < 0.0 => format!("-{magnitude}"),
        Some(magnitude) => magnitude,
        None => format!("{:.*}", digits, value),
    };
    // "-0.00" reads as noise in a table.
    if rendered.starts_with('-') && rendered[1..].chars().all(|c| c == '0' || c == '.') {
        rendered[1..].to_string()
    } else {
        rendered
    }
}

/// Digits needed to print any finite double exactly.
const EXACT_DIGITS: usize = 1100;

/// When the exact decimal expansion of `magnitude` sits precisely halfway
/// between two `digits`-decimal values, the larger of the two. `None` for
/// every non-tie.
fn round_exact_tie(magnitude: f64, digits: usize) -> Option<String> {
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let (int_part, frac_part) = exact.split_once('.')?;
    let (kept, tail) = frac_part.split_at(digits);
    let mut tail = tail.chars();
    if tail.next() != Some('5') || !tail.all(|c| c == '0') {
        return None;
    }

    // Increment the truncated digits by one unit in the last place.
    let mut all: Vec<u8> = int_part.bytes().chain(kept.bytes()).collect();
    let mut carry = true;
    for d in all.iter_mut().rev() {
        if !carry {
            break;
        }
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            carry = false;
        }
    }
    if carry {
        all.insert(0, b'1');
    }
    let split = all.len() - digits;
    let (int_digits, frac_digits) = all.split_at(split);
    let int_digits = String::from_utf8_lossy(int_digits);
    if digits == 0 {
        Some(int_digits.into_owned())
    } else {
        Some(format!("{int_digits}.{}", String::from_utf8_lossy(frac_digits)))
    }
}

// ---------------------------------------------------------------------------
// FieldFormat
// ---------------------------------------------------------------------------

/// How a comparison field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    /// Strings verbatim, numbers in plain form.
    Label,
    /// Fraction rendered as a percentage with one decimal: 0.275 → "27.5%".
    Percentage,
    /// Two decimals, or one decimal when |value| > 10.
    Magnitude,
    /// Scouting grade with one decimal.
    Rating,
}

impl FieldFormat {
    /// Render a possibly missing cell. Missing values are [`MISSING`]; text in
    /// a numeric field passes through verbatim.
    pub fn render(&self, cell: Option<&CellValue>) -> String {
        let Some(cell) = cell else {
            return MISSING.to_string();
        };
        let n = match cell {
            CellValue::Text(s) => return s.clone(),
            CellValue::Number(n) => *n,
        };
        match self {
            FieldFormat::Label => plain_number(n),
            FieldFormat::Percentage => format!("{}%", to_fixed(n * 100.0, 1)),
            FieldFormat::Magnitude => format_magnitude(n),
            FieldFormat::Rating => to_fixed(n, 1),
        }
    }
}

/// Two decimals, one decimal once the magnitude strictly exceeds 10.
pub fn format_magnitude(value: f64) -> String {
    if value > 10.0 || value < -10.0 {
        to_fixed(value, 1)
    } else {
        to_fixed(value, 2)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
