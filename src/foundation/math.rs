/// Denominators smaller than this are treated as zero.
pub(crate) const EPSILON: f64 = 1e-9;

/// Clamp to `[0, 1]`, mapping NaN to 0 so it cannot leak into unrelated outputs.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// `num / den`, or `None` when the result would not be a usable finite number.
pub(crate) fn safe_ratio(num: f64, den: f64) -> Option<f64> {
    if !num.is_finite() || !den.is_finite() || den.abs() < EPSILON {
        return None;
    }
    Some(num / den)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
