use crate::{
    foundation::core::ElementId,
    foundation::error::{MotionError, MotionResult},
    host::EventSource,
    trigger::pointer::TiltScale,
};

/// What drives a binding. Closed set; changing any field of a bound trigger means a full rebind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerSpec {
    /// Scroll offsets (document px) between which progress runs from 0 to 1.
    ScrollRegion {
        start: f64,
        end: f64,
        #[serde(default)]
        pin: bool,
    },
    /// Pointer movement inside `bounds`.
    PointerWithin {
        bounds: ElementId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tilt: Option<TiltScale>,
    },
    /// Visibility of the bound target crossing `ratio`.
    VisibilityThreshold {
        ratio: f64,
        #[serde(default)]
        once: bool,
    },
}

impl TriggerSpec {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ScrollRegion { .. } => "scroll_region",
            Self::PointerWithin { .. } => "pointer_within",
            Self::VisibilityThreshold { .. } => "visibility_threshold",
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        match self {
            Self::ScrollRegion { start, end, .. } => {
                if !start.is_finite() || !end.is_finite() {
                    return Err(MotionError::configuration(
                        "scroll region offsets must be finite",
                    ));
                }
                if end <= start {
                    return Err(MotionError::configuration(format!(
                        "scroll region end ({end}) must be greater than start ({start})"
                    )));
                }
                Ok(())
            }
            Self::PointerWithin { tilt, .. } => tilt.map_or(Ok(()), |t| t.validate()),
            Self::VisibilityThreshold { ratio, .. } => {
                if !(0.0..=1.0).contains(ratio) {
                    return Err(MotionError::configuration(format!(
                        "visibility ratio must be within [0, 1], got {ratio}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Event source a binding on `target` subscribes to.
    pub fn source(&self, target: ElementId) -> EventSource {
        match self {
            Self::ScrollRegion { .. } => EventSource::Scroll,
            Self::PointerWithin { bounds, .. } => EventSource::Pointer { element: *bounds },
            Self::VisibilityThreshold { ratio, .. } => EventSource::Intersection {
                element: target,
                threshold: *ratio,
            },
        }
    }
}
