use std::fmt;

use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Opaque handle of an element in the host document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a binding owned by a [`Stage`](crate::Stage).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct BindingId(pub u64);

/// Handle of an event subscription registered with a [`Host`](crate::Host).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SubscriptionId(pub u64);

/// Handle of a time-driven player running inside the [`Animator`](crate::Animator).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct PlayerId(pub u64);

/// Return `rect` if it can be used as a divisor (finite, positive width and height).
pub fn measurable(rect: Rect) -> MotionResult<Rect> {
    let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(MotionError::degenerate("rect has non-finite coordinates"));
    }
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Err(MotionError::degenerate(format!(
            "rect is {}x{}",
            rect.width(),
            rect.height()
        )));
    }
    Ok(rect)
}

/// Edge-inclusive containment (kurbo's `Rect::contains` excludes the far edges).
pub fn contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
