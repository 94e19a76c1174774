use crate::{
    animation::{
        property::{Property, Props},
        timeline::{Step, Track},
    },
    foundation::math,
};

/// Progress-driven playback. Holds no playback state: the same progress always yields the same
/// values, bit for bit.
#[derive(Clone, Debug)]
pub struct ScrubPlayer {
    track: Track,
}

impl ScrubPlayer {
    pub fn new(steps: &[Step], current: impl Fn(Property) -> f64) -> Self {
        Self {
            track: Track::resolve(steps, current),
        }
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.track.properties()
    }

    pub fn sample(&self, progress: f64) -> Props {
        self.track
            .sample(math::clamp01(progress) * self.track.length())
    }
}

/// Lets an applied progress chase a target progress over frames.
#[derive(Clone, Debug)]
pub struct Smoother {
    lag_ms: f64,
    epsilon: f64,
    applied: Option<f64>,
    target: f64,
    last_ms: f64,
}

impl Smoother {
    pub fn new(lag_ms: f64, epsilon: f64) -> Self {
        Self {
            lag_ms,
            epsilon,
            applied: None,
            target: 0.0,
            last_ms: 0.0,
        }
    }

    pub fn applied(&self) -> Option<f64> {
        self.applied
    }

    pub fn is_settled(&self) -> bool {
        self.applied == Some(self.target)
    }

    /// Record a new target. Returns the progress to apply right away, if any; otherwise the
    /// caller needs frames to [`advance`](Self::advance).
    pub fn retarget(&mut self, target: f64, now_ms: f64) -> Option<f64> {
        let settled = self.is_settled();
        self.target = target;
        match self.applied {
            None => {
                self.applied = Some(target);
                self.last_ms = now_ms;
                Some(target)
            }
            Some(_) if self.lag_ms <= 0.0 => {
                self.applied = Some(target);
                Some(target)
            }
            Some(_) => {
                if settled {
                    self.last_ms = now_ms;
                }
                None
            }
        }
    }

    /// Step toward the target. `None` when already there.
    pub fn advance(&mut self, now_ms: f64) -> Option<f64> {
        let applied = self.applied?;
        if applied == self.target {
            return None;
        }
        let k = math::approach_factor(now_ms - self.last_ms, self.lag_ms);
        let mut next = applied + (self.target - applied) * k;
        if (self.target - next).abs() < self.epsilon {
            next = self.target;
        }
        self.last_ms = now_ms;
        self.applied = Some(next);
        Some(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/scrub.rs"]
mod tests;
