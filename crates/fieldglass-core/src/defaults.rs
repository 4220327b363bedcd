// Coalesce-with-default: the one place where missing payload fields are
// resolved. Every component that reads loosely shaped JSON goes through here.

use serde_json::Value;

/// Display marker for a value that is absent.
pub const MISSING: &str = "N/A";

/// Returns the value unless it is JSON null.
pub fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// First non-null value for `key` across `sources`, in order.
pub fn coalesce<'a>(sources: &[&'a Value], key: &str) -> Option<&'a Value> {
    sources.iter().find_map(|src| present(src.get(key)))
}

/// First numeric value for `key` across `sources`. Non-numeric values are
/// skipped, so a malformed grade falls through to the next source.
pub fn coalesce_number(sources: &[&Value], key: &str) -> Option<f64> {
    sources
        .iter()
        .find_map(|src| present(src.get(key)).and_then(Value::as_f64))
}

/// [`coalesce_number`] with a fallback.
pub fn number_or(sources: &[&Value], key: &str, default: f64) -> f64 {
    coalesce_number(sources, key).unwrap_or(default)
}

/// First string value for `key` across `sources`.
pub fn coalesce_str(sources: &[&Value], key: &str) -> Option<String> {
    sources
        .iter()
        .find_map(|src| present(src.get(key)).and_then(Value::as_str))
        .map(str::to_string)
}
