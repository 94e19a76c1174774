use crate::animation::{
    property::{Property, Props},
    timeline::{Repeat, Step, Track},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Finished,
    Cancelled,
}

/// Time-driven playback of a step sequence, advanced by sampling with the current time.
#[derive(Clone, Debug)]
pub struct TweenPlayer {
    track: Track,
    repeat: Repeat,
    started_ms: f64,
    state: PlayState,
}

impl TweenPlayer {
    /// Start at `now_ms`; `current` supplies start values the steps leave open.
    pub fn start(
        steps: &[Step],
        repeat: Repeat,
        now_ms: f64,
        current: impl Fn(Property) -> f64,
    ) -> Self {
        Self {
            track: Track::resolve(steps, current),
            repeat,
            started_ms: now_ms,
            state: PlayState::Running,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlayState::Running
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.track.properties()
    }

    /// Stop further updates. Values already written stay where they are.
    pub fn cancel(&mut self) {
        if self.state == PlayState::Running {
            self.state = PlayState::Cancelled;
        }
    }

    fn position(&self, elapsed: f64) -> (f64, bool) {
        let len = self.track.length();
        match self.repeat {
            Repeat::Once => (elapsed.min(len), elapsed >= len),
            _ if len <= 0.0 => (0.0, true),
            Repeat::Loop => (elapsed % len, false),
            Repeat::PingPong => {
                let cycle = 2.0 * len;
                let m = elapsed % cycle;
                (if m <= len { m } else { cycle - m }, false)
            }
        }
    }

    /// Values at `now_ms`, or `None` once the player stopped. A once-through player returns its
    /// exact end state on the sample that finishes it.
    pub fn sample(&mut self, now_ms: f64) -> Option<Props> {
        if !self.is_running() {
            return None;
        }
        let elapsed = (now_ms - self.started_ms).max(0.0);
        let (pos, done) = self.position(elapsed);
        if done {
            self.state = PlayState::Finished;
            return Some(self.track.end_state());
        }
        Some(self.track.sample(pos))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/tween.rs"]
mod tests;
