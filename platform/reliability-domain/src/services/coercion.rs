//! Explicit per-column coercion of raw summary cells.
//!
//! Surrounding whitespace is ignored for numeric cells. Non-finite values are
//! rejected because they have no JSON representation.

/// Parses an integer count.
///
/// Whole-valued float literals (`120.0`, `1.2e2`) are accepted; anything with
/// a fractional part or outside the `i64` range is not.
pub fn coerce_integer(raw: &str) -> Option<i64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = value.parse::<i64>() {
        return Some(parsed);
    }

    let float = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if float.fract() != 0.0 {
        return None;
    }
    // i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive.
    if float < i64::MIN as f64 || float >= i64::MAX as f64 {
        return None;
    }
    Some(float as i64)
}

pub fn coerce_float(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
