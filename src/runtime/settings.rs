use std::{path::Path, sync::OnceLock};

use anyhow::Context as _;

use crate::{
    animation::ease::Ease,
    foundation::error::{MotionError, MotionResult},
    trigger::visibility::RootMargin,
};

/// Process-wide presentation constants. None of these are contracts; they are the defaults a
/// binding falls back to when its config leaves a value open.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default pointer tilt: `offset_from_center / tilt_divisor`.
    pub tilt_divisor: f64,
    /// Duration of the tween each pointer sample starts on a follow timeline.
    pub follow_duration_ms: f64,
    pub follow_ease: Ease,
    /// Duration of hover-in and return-to-rest tweens.
    pub settle_duration_ms: f64,
    pub settle_ease: Ease,
    /// Distance at which smoothed scrub progress snaps onto its target.
    pub smoothing_epsilon: f64,
    /// Margin applied when intersection ratios are computed from geometry.
    pub root_margin: RootMargin,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tilt_divisor: 10.0,
            follow_duration_ms: 200.0,
            follow_ease: Ease::OutQuart,
            settle_duration_ms: 300.0,
            settle_ease: Ease::OutQuart,
            smoothing_epsilon: 1e-4,
            root_margin: RootMargin::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> MotionResult<()> {
        if !self.tilt_divisor.is_finite() || self.tilt_divisor == 0.0 {
            return Err(MotionError::configuration(
                "tilt_divisor must be finite and non-zero",
            ));
        }
        for (name, v) in [
            ("follow_duration_ms", self.follow_duration_ms),
            ("settle_duration_ms", self.settle_duration_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(MotionError::configuration(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if !(self.smoothing_epsilon.is_finite() && self.smoothing_epsilon > 0.0) {
            return Err(MotionError::configuration(
                "smoothing_epsilon must be finite and > 0",
            ));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: &Path) -> MotionResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Install the process-wide settings. Call once at application start, before the first
/// [`Stage::new`](crate::Stage::new).
///
/// Calling again with equal settings is a no-op. Calling with different settings, or after
/// [`settings`] already froze the defaults to something else, fails with
/// [`MotionError::Configuration`]. There is no global teardown: stages tear down their own
/// bindings.
pub fn init(settings: Settings) -> MotionResult<&'static Settings> {
    settings.validate()?;
    let mut installed = false;
    let current = SETTINGS.get_or_init(|| {
        installed = true;
        settings.clone()
    });
    if installed {
        tracing::debug!(?current, "motion settings installed");
        return Ok(current);
    }
    if *current != settings {
        return Err(MotionError::configuration(
            "motion settings were already initialized with different values",
        ));
    }
    Ok(current)
}

/// The installed settings, freezing the defaults if [`init`] was never called.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::default)
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/settings.rs"]
mod tests;
