use crate::foundation::{
    core::{Rect, Size, measurable},
    error::{MotionError, MotionResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityEdge {
    Entered,
    Exited,
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct VisibilitySample {
    pub edge: VisibilityEdge,
    pub ratio: f64,
    pub visible: bool,
}

/// Turns a stream of intersection ratios into enter/exit edges.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityTracker {
    threshold: f64,
    visible: bool,
}

impl VisibilityTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn observe(&mut self, ratio: f64) -> MotionResult<VisibilitySample> {
        if !ratio.is_finite() {
            return Err(MotionError::degenerate("intersection ratio is not finite"));
        }
        let ratio = ratio.clamp(0.0, 1.0);
        let visible = if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        };
        let edge = match (self.visible, visible) {
            (false, true) => VisibilityEdge::Entered,
            (true, false) => VisibilityEdge::Exited,
            _ => VisibilityEdge::Unchanged,
        };
        self.visible = visible;
        Ok(VisibilitySample {
            edge,
            ratio,
            visible,
        })
    }
}

/// Grows (positive) or shrinks (negative) the viewport before intersecting, in px.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub fn vertical(px: f64) -> Self {
        Self {
            top: px,
            bottom: px,
            ..Self::default()
        }
    }
}

/// Fraction of `target` (viewport-relative) inside the margin-adjusted viewport.
pub fn intersection_ratio(target: Rect, viewport: Size, margin: RootMargin) -> MotionResult<f64> {
    let target = measurable(target)?;
    let root = Rect::new(
        -margin.left,
        -margin.top,
        viewport.width + margin.right,
        viewport.height + margin.bottom,
    );
    if root.width() <= 0.0 || root.height() <= 0.0 {
        return Ok(0.0);
    }
    let overlap = target.intersect(root);
    let area = overlap.width().max(0.0) * overlap.height().max(0.0);
    Ok((area / target.area()).clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/visibility.rs"]
mod tests;
