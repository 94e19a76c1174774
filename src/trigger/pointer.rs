use crate::foundation::{
    core::{Point, Rect, measurable},
    error::{MotionError, MotionResult},
};

/// How the offset from the bounds' center turns into tilt.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiltScale {
    /// `offset / divisor`.
    Divisor(f64),
    /// `offset * factor` (magnetic pull).
    Factor(f64),
    /// `offset / half_extent * max`: `±max` at the edges.
    Normalized(f64),
}

impl TiltScale {
    pub fn validate(self) -> MotionResult<()> {
        let (name, v) = match self {
            Self::Divisor(d) => ("divisor", d),
            Self::Factor(f) => ("factor", f),
            Self::Normalized(m) => ("normalized", m),
        };
        if !v.is_finite() || (matches!(self, Self::Divisor(_)) && v == 0.0) {
            return Err(MotionError::configuration(format!(
                "tilt {name} must be finite and non-zero, got {v}"
            )));
        }
        Ok(())
    }

    fn apply(self, offset: f64, half_extent: f64) -> f64 {
        match self {
            Self::Divisor(d) => offset / d,
            Self::Factor(f) => offset * f,
            Self::Normalized(m) => offset / half_extent * m,
        }
    }
}

/// Pointer sample relative to the bounds: position from the top-left plus a tilt pair. The raw
/// viewport position is kept for effects that track the pointer across the whole screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
    #[serde(default)]
    pub client_x: f64,
    #[serde(default)]
    pub client_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAxis {
    X,
    Y,
    TiltX,
    TiltY,
    /// Viewport position, independent of where the bounds are scrolled to.
    ClientX,
    ClientY,
}

impl PointerState {
    pub fn axis(&self, axis: PointerAxis) -> f64 {
        match axis {
            PointerAxis::X => self.x,
            PointerAxis::Y => self.y,
            PointerAxis::TiltX => self.tilt_x,
            PointerAxis::TiltY => self.tilt_y,
            PointerAxis::ClientX => self.client_x,
            PointerAxis::ClientY => self.client_y,
        }
    }
}

/// Normalize a client-space pointer position against viewport-relative `bounds`.
///
/// Tilt is clamped to what the bounds' edges produce, so a pointer that strays outside does not
/// overshoot. Unmeasurable bounds yield [`MotionError::DegenerateGeometry`].
pub fn normalize_pointer(client: Point, bounds: Rect, scale: TiltScale) -> MotionResult<PointerState> {
    let bounds = measurable(bounds)?;
    if !(client.x.is_finite() && client.y.is_finite()) {
        return Err(MotionError::degenerate("pointer position is not finite"));
    }
    let half_w = bounds.width() / 2.0;
    let half_h = bounds.height() / 2.0;
    let x = client.x - bounds.x0;
    let y = client.y - bounds.y0;
    let dx = (x - half_w).clamp(-half_w, half_w);
    let dy = (y - half_h).clamp(-half_h, half_h);
    Ok(PointerState {
        x,
        y,
        tilt_x: scale.apply(dx, half_w),
        tilt_y: scale.apply(dy, half_h),
        client_x: client.x,
        client_y: client.y,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/pointer.rs"]
mod tests;
