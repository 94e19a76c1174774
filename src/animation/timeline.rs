use crate::{
    animation::{
        ease::Ease,
        property::{Lerp, Property, Props},
    },
    foundation::error::{MotionError, MotionResult},
    trigger::pointer::PointerAxis,
};

fn default_span() -> f64 {
    1.0
}

fn default_gain() -> f64 {
    1.0
}

/// One interpolation step. `span` is a relative weight for scrubbed timelines and milliseconds
/// for timed ones.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// Start values; properties missing here start from wherever the element currently is.
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub from: Props,
    pub to: Props,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default = "default_span")]
    pub span: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    #[default]
    Once,
    Loop,
    PingPong,
}

/// Progress-driven timeline: output is a pure function of a `0..=1` progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrubbedTimeline {
    pub steps: Vec<Step>,
    /// Time constant with which the applied progress chases the trigger progress. 0 = immediate.
    #[serde(default)]
    pub smoothing_ms: f64,
}

/// Time-driven timeline, started by trigger edges (region enter, hover, visibility).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedTimeline {
    pub steps: Vec<Step>,
    #[serde(default)]
    pub repeat: Repeat,
    /// Terminal state written when the timeline is deactivated.
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub rest: Props,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_ms: Option<f64>,
}

/// Maps one pointer axis onto one property: `value = source * gain + offset`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Channel {
    pub property: Property,
    pub source: PointerAxis,
    #[serde(default = "default_gain")]
    pub gain: f64,
    #[serde(default)]
    pub offset: f64,
}

/// Pointer-follow timeline: each pointer sample retargets a short tween.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FollowTimeline {
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<Ease>,
    /// Tweened in when the pointer enters the bounds.
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub enter: Props,
    /// Tweened in when the pointer leaves the bounds.
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub rest: Props,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_ms: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineSpec {
    Scrubbed(ScrubbedTimeline),
    Timed(TimedTimeline),
    Follow(FollowTimeline),
}

impl TimelineSpec {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scrubbed(_) => "scrubbed",
            Self::Timed(_) => "timed",
            Self::Follow(_) => "follow",
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        match self {
            Self::Scrubbed(t) => {
                validate_steps(&t.steps)?;
                let total: f64 = t.steps.iter().map(|s| s.span).sum();
                if total <= 0.0 {
                    return Err(MotionError::configuration(
                        "scrubbed timeline needs a positive total span",
                    ));
                }
                validate_ms("smoothing_ms", t.smoothing_ms)
            }
            Self::Timed(t) => {
                validate_steps(&t.steps)?;
                if t.repeat != Repeat::Once && t.steps.iter().map(|s| s.span).sum::<f64>() <= 0.0
                {
                    return Err(MotionError::configuration(
                        "repeating timeline needs a positive total duration",
                    ));
                }
                t.rest.validate("rest")?;
                t.settle_ms.map_or(Ok(()), |ms| validate_ms("settle_ms", ms))
            }
            Self::Follow(f) => {
                if f.channels.is_empty() && f.enter.is_empty() {
                    return Err(MotionError::configuration(
                        "follow timeline needs channels or enter values",
                    ));
                }
                for c in &f.channels {
                    if !c.gain.is_finite() || !c.offset.is_finite() {
                        return Err(MotionError::configuration(format!(
                            "channel {:?} has a non-finite gain or offset",
                            c.property
                        )));
                    }
                }
                f.enter.validate("enter")?;
                f.rest.validate("rest")?;
                f.duration_ms
                    .map_or(Ok(()), |ms| validate_ms("duration_ms", ms))?;
                f.settle_ms.map_or(Ok(()), |ms| validate_ms("settle_ms", ms))
            }
        }
    }
}

fn validate_ms(name: &str, ms: f64) -> MotionResult<()> {
    if !ms.is_finite() || ms < 0.0 {
        return Err(MotionError::configuration(format!(
            "{name} must be finite and >= 0, got {ms}"
        )));
    }
    Ok(())
}

fn validate_steps(steps: &[Step]) -> MotionResult<()> {
    if steps.is_empty() {
        return Err(MotionError::configuration("timeline has no steps"));
    }
    for (i, s) in steps.iter().enumerate() {
        if !s.span.is_finite() || s.span < 0.0 {
            return Err(MotionError::configuration(format!(
                "step {i} span must be finite and >= 0, got {}",
                s.span
            )));
        }
        s.from.validate("from")?;
        s.to.validate("to")?;
    }
    Ok(())
}

#[derive(Clone, Debug)]
struct Segment {
    start: f64,
    end: f64,
    from: Props,
    to: Props,
    ease: Ease,
}

/// Steps laid out on one axis with every `from` resolved.
///
/// Sampling is a pure function of the position: segments before the position contribute their
/// end values, the containing segment its interpolated value, later segments nothing beyond the
/// initial values.
#[derive(Clone, Debug)]
pub(crate) struct Track {
    segments: Vec<Segment>,
    initial: Props,
    length: f64,
}

impl Track {
    /// Resolve missing `from` values through `current` (the element's present values).
    pub(crate) fn resolve(steps: &[Step], current: impl Fn(Property) -> f64) -> Self {
        let mut running = Props::new();
        let mut initial = Props::new();
        let mut segments = Vec::with_capacity(steps.len());
        let mut cursor = 0.0;

        for step in steps {
            let mut from = Props::new();
            for p in step.to.keys() {
                let v = step
                    .from
                    .get(p)
                    .or_else(|| running.get(p))
                    .unwrap_or_else(|| current(p));
                from.set(p, v);
                if !initial.contains(p) {
                    initial.set(p, v);
                }
            }
            running.merge(&step.to);

            let end = cursor + step.span;
            segments.push(Segment {
                start: cursor,
                end,
                from,
                to: step.to.clone(),
                ease: step.ease,
            });
            cursor = end;
        }

        Self {
            segments,
            initial,
            length: cursor,
        }
    }

    pub(crate) fn length(&self) -> f64 {
        self.length
    }

    pub(crate) fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.initial.keys()
    }

    pub(crate) fn sample(&self, pos: f64) -> Props {
        let mut out = self.initial.clone();
        for seg in &self.segments {
            if pos < seg.start {
                break;
            }
            let t = if seg.end > seg.start {
                ((pos - seg.start) / (seg.end - seg.start)).min(1.0)
            } else {
                1.0
            };
            out.merge(&Props::lerp(&seg.from, &seg.to, seg.ease.apply(t)));
        }
        out
    }

    pub(crate) fn end_state(&self) -> Props {
        self.sample(self.length)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
