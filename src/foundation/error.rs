use crate::foundation::core::ElementId;

/// Convenience result type used across motionbind.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy used by binding, trigger and timeline APIs.
///
/// None of these escape a [`Stage`](crate::Stage) as a panic: a binding that hits one either
/// stays inert (configuration problems) or tears itself down (detached targets).
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Missing/invalid target element or malformed trigger/timeline data.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The target element left the document while a binding was live.
    #[error("detached target: element {0} is not in the document")]
    DetachedTarget(ElementId),

    /// Geometry that would divide by zero (zero-sized or non-finite rectangles).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Errors while validating or sampling timelines.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing configuration and scripts.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`MotionError::DegenerateGeometry`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`MotionError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether a binding should hold its previous output instead of giving up.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::DegenerateGeometry(_))
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
