/// Clamp into `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Linear interpolation that lands exactly on the endpoints.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// `num / den`, or `None` when the quotient would not be finite.
pub(crate) fn ratio(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 || !den.is_finite() || !num.is_finite() {
        return None;
    }
    Some(num / den)
}

/// Fraction of the remaining distance covered after `dt_ms` with time constant `lag_ms`.
pub(crate) fn approach_factor(dt_ms: f64, lag_ms: f64) -> f64 {
    if lag_ms <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt_ms.max(0.0) / lag_ms).exp()
}
