//! Display formatting for vitals values.
//!
//! Substituting a marker for a missing reading happens here and only
//! here; the gateway hands `None` through untouched so a true zero
//! stays distinguishable from an absent measurement.

/// Marker rendered for an absent or unparseable value. Never "0" and
/// never a blank string.
pub const NOT_AVAILABLE: &str = "not available";

/// One decimal place plus unit: `format_value(Some(72.0), "bpm")` is
/// "72.0 bpm". Unitless values omit the trailing unit.
pub fn format_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if unit.is_empty() {
                format!("{v:.1}")
            } else {
                format!("{v:.1} {unit}")
            }
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// The composite score renders with one decimal and no unit.
pub fn format_score(value: Option<f64>) -> String {
    format_value(value, "")
}

/// Consciousness is categorical; render the literal or the marker.
pub fn format_consciousness(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
