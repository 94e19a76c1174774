use crate::{
    animation::{
        ops,
        property::{Property, Props},
        timeline::{Repeat, Step, TimelineSpec},
    },
    binding::{Env, config::BindingConfig},
    foundation::{
        core::{BindingId, ElementId, PlayerId, Point, SubscriptionId, contains_inclusive},
        error::{MotionError, MotionResult},
    },
    host::HostEvent,
    player::scrub::{ScrubPlayer, Smoother},
    trigger::{
        pointer::{PointerState, TiltScale, normalize_pointer},
        scroll::{pin_offset, scroll_progress},
        spec::TriggerSpec,
        visibility::{VisibilityEdge, VisibilityTracker},
    },
};

/// `Unbound → Subscribing → Active → TearingDown → Unbound`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingState {
    Unbound,
    /// Subscribed, waiting for the source to confirm (first intersection callback).
    Subscribing,
    Active,
    TearingDown,
}

/// State that only exists while subscribed. Dropping it is what "clear on unmount" means.
#[derive(Debug)]
struct Live {
    producer: PlayerId,
    scrub: Option<ScrubPlayer>,
    smoother: Smoother,
    visibility: Option<VisibilityTracker>,
    pointer: Option<PointerState>,
    hovering: bool,
    played: bool,
}

/// Live association of a trigger, a timeline and a target element.
#[derive(Debug)]
pub struct Binding {
    id: BindingId,
    config: BindingConfig,
    state: BindingState,
    subscription: Option<SubscriptionId>,
    live: Option<Live>,
    error: Option<MotionError>,
}

impl Binding {
    pub(crate) fn new(id: BindingId, config: BindingConfig) -> Self {
        Self {
            id,
            config,
            state: BindingState::Unbound,
            subscription: None,
            live: None,
            error: None,
        }
    }

    pub fn id(&self) -> BindingId {
        self.id
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    /// Why the binding is inert, if it failed.
    pub fn error(&self) -> Option<&MotionError> {
        self.error.as_ref()
    }

    pub fn pointer(&self) -> Option<PointerState> {
        self.live.as_ref().and_then(|l| l.pointer)
    }

    /// Whether smoothing still needs frames.
    pub fn is_settling(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|l| l.smoother.applied().is_some() && !l.smoother.is_settled())
    }

    pub(crate) fn record_error(&mut self, err: MotionError) {
        self.error = Some(err);
    }

    /// Subscribe to the trigger's source. A no-op unless `Unbound`.
    pub(crate) fn bind(&mut self, env: &mut Env<'_>) -> MotionResult<()> {
        if self.state != BindingState::Unbound {
            return Ok(());
        }
        self.error = None;
        self.config.validate()?;

        let target = self.config.target;
        if !env.host.is_attached(target) {
            return Err(MotionError::configuration(format!(
                "target {target} is not in the document"
            )));
        }
        if let TriggerSpec::PointerWithin { bounds, .. } = &self.config.trigger
            && !env.host.is_attached(*bounds)
        {
            return Err(MotionError::configuration(format!(
                "pointer bounds {bounds} are not in the document"
            )));
        }

        self.state = BindingState::Subscribing;
        let subscription = match env.host.subscribe(self.config.trigger.source(target)) {
            Ok(id) => id,
            Err(err) => {
                self.state = BindingState::Unbound;
                return Err(err);
            }
        };
        self.subscription = Some(subscription);
        self.live = Some(self.start_live(env));

        // DOM listeners are live as soon as they are added; observers confirm with a callback.
        if !matches!(self.config.trigger, TriggerSpec::VisibilityThreshold { .. }) {
            self.state = BindingState::Active;
        }
        tracing::debug!(
            binding = ?self.id,
            %target,
            trigger = self.config.trigger.kind_name(),
            timeline = self.config.timeline.kind_name(),
            state = ?self.state,
            "binding subscribed"
        );

        if let TriggerSpec::ScrollRegion { .. } = self.config.trigger {
            self.on_scroll(env)?;
        }
        Ok(())
    }

    fn start_live(&self, env: &mut Env<'_>) -> Live {
        let target = self.config.target;
        let (scrub, smoothing_ms) = match &self.config.timeline {
            TimelineSpec::Scrubbed(t) => {
                let host = &*env.host;
                let player = ScrubPlayer::new(&t.steps, |p| {
                    host.read(target, p).unwrap_or_else(|| p.identity())
                });
                (Some(player), t.smoothing_ms)
            }
            _ => (None, 0.0),
        };
        let mut claims: Vec<Property> = scrub
            .as_ref()
            .map(|s| s.properties().collect())
            .unwrap_or_default();
        if let TriggerSpec::ScrollRegion { pin: true, .. } = self.config.trigger {
            claims.push(Property::PinOffset);
        }
        let producer = env.animator.producer(self.id, target, claims);
        let visibility = match self.config.trigger {
            TriggerSpec::VisibilityThreshold { ratio, .. } => Some(VisibilityTracker::new(ratio)),
            _ => None,
        };
        Live {
            producer,
            scrub,
            smoother: Smoother::new(smoothing_ms, env.settings.smoothing_epsilon),
            visibility,
            pointer: None,
            hovering: false,
            played: false,
        }
    }

    /// Unsubscribe and cancel everything in flight. Returns `false` if already unbound.
    pub(crate) fn teardown(&mut self, env: &mut Env<'_>) -> bool {
        if self.state == BindingState::Unbound {
            return false;
        }
        self.state = BindingState::TearingDown;
        if let Some(subscription) = self.subscription.take() {
            env.host.unsubscribe(subscription);
        }
        let cancelled = env.animator.cancel_binding(self.id);
        self.live = None;
        self.state = BindingState::Unbound;
        tracing::debug!(binding = ?self.id, cancelled, "binding torn down");
        true
    }

    /// Full rebind: tear down under the old config, bind under the new one.
    pub(crate) fn rebind(&mut self, config: BindingConfig, env: &mut Env<'_>) -> MotionResult<()> {
        self.teardown(env);
        self.config = config;
        self.bind(env)
    }

    /// Route one host event. Errors are for the stage to contain.
    pub(crate) fn handle(&mut self, event: HostEvent, env: &mut Env<'_>) -> MotionResult<()> {
        if !matches!(
            self.state,
            BindingState::Subscribing | BindingState::Active
        ) {
            return Ok(());
        }
        let target = self.config.target;
        if !env.host.is_attached(target) {
            return Err(MotionError::DetachedTarget(target));
        }

        match (self.config.trigger.clone(), event) {
            (TriggerSpec::ScrollRegion { .. }, HostEvent::Scroll) => self.on_scroll(env),
            (TriggerSpec::PointerWithin { bounds, tilt }, HostEvent::PointerMove { x, y }) => {
                self.on_pointer_move(bounds, tilt, Point::new(x, y), env)
            }
            (TriggerSpec::PointerWithin { bounds, .. }, HostEvent::PointerEnter { element })
                if bounds == element =>
            {
                self.on_hover(true, env)
            }
            (TriggerSpec::PointerWithin { bounds, .. }, HostEvent::PointerLeave { element })
                if bounds == element =>
            {
                self.on_hover(false, env)
            }
            (
                TriggerSpec::VisibilityThreshold { once, .. },
                HostEvent::Intersection { element, ratio },
            ) if element == target => self.on_intersection(ratio, once, env),
            (_, HostEvent::Frame) => self.on_frame(env),
            _ => Ok(()),
        }
    }

    /// Contain a handler failure: detached targets and hard failures tear down, degenerate
    /// geometry just holds the previous output.
    pub(crate) fn contain(&mut self, err: MotionError, env: &mut Env<'_>) {
        match err {
            MotionError::DetachedTarget(el) => {
                tracing::debug!(binding = ?self.id, %el, "target detached, tearing down");
                self.teardown(env);
                self.error = Some(MotionError::DetachedTarget(el));
            }
            err if err.is_transient() => {
                tracing::debug!(binding = ?self.id, %err, "holding previous output");
            }
            err => {
                tracing::warn!(binding = ?self.id, %err, "binding failed, leaving it inert");
                self.teardown(env);
                self.error = Some(err);
            }
        }
    }

    /// Deactivate a time-driven timeline: supersede whatever runs with a tween to `rest`.
    pub(crate) fn settle_to_rest(&mut self, env: &mut Env<'_>) -> MotionResult<()> {
        if self.state != BindingState::Active {
            return Ok(());
        }
        let live = live(&mut self.live)?;
        live.hovering = false;
        live.pointer = None;
        match &self.config.timeline {
            TimelineSpec::Timed(t) => self.settle(env, &t.rest, t.settle_ms),
            TimelineSpec::Follow(f) => self.settle(env, &f.rest, f.settle_ms),
            TimelineSpec::Scrubbed(_) => Ok(()),
        }
    }

    fn play(&self, env: &mut Env<'_>, steps: &[Step], repeat: Repeat) -> MotionResult<()> {
        env.animator
            .play(&mut *env.host, self.id, self.config.target, steps, repeat)
            .map(|_| ())
    }

    fn settle(&self, env: &mut Env<'_>, rest: &Props, settle_ms: Option<f64>) -> MotionResult<()> {
        if rest.is_empty() {
            return Ok(());
        }
        let ms = settle_ms.unwrap_or(env.settings.settle_duration_ms);
        let step = ops::to(rest.clone(), ms, env.settings.settle_ease);
        self.play(env, &[step], Repeat::Once)
    }

    fn apply_progress(&mut self, progress: f64, env: &mut Env<'_>) -> MotionResult<()> {
        let live = live(&mut self.live)?;
        let Some(scrub) = &live.scrub else {
            return Ok(());
        };
        let props = scrub.sample(progress);
        env.animator
            .write(&mut *env.host, live.producer, &props)
            .map(|_| ())
    }

    fn retarget_progress(&mut self, progress: f64, env: &mut Env<'_>) -> MotionResult<()> {
        let now = env.host.now_ms();
        match live(&mut self.live)?.smoother.retarget(progress, now) {
            Some(p) => self.apply_progress(p, env),
            None => {
                env.host.request_frame();
                Ok(())
            }
        }
    }

    fn on_scroll(&mut self, env: &mut Env<'_>) -> MotionResult<()> {
        let TriggerSpec::ScrollRegion { start, end, pin } = self.config.trigger else {
            return Ok(());
        };
        let scroll = env.host.scroll_y();
        let progress = scroll_progress(start, end, scroll)?;

        if pin {
            let offset = Props::new().with(Property::PinOffset, pin_offset(start, end, scroll));
            let producer = live(&mut self.live)?.producer;
            env.animator.write(&mut *env.host, producer, &offset)?;
        }

        if let TimelineSpec::Scrubbed(_) = self.config.timeline {
            return self.retarget_progress(progress, env);
        }
        let live = live(&mut self.live)?;
        let TimelineSpec::Timed(t) = &self.config.timeline else {
            return Ok(());
        };
        if progress > 0.0 && !live.played {
            live.played = true;
            self.play(env, &t.steps, t.repeat)?;
        } else if progress == 0.0 && live.played && !t.rest.is_empty() {
            // Back above the region start: a timeline with a rest state is reversible.
            live.played = false;
            self.settle(env, &t.rest, t.settle_ms)?;
        }
        Ok(())
    }

    fn on_pointer_move(
        &mut self,
        bounds: ElementId,
        tilt: Option<TiltScale>,
        client: Point,
        env: &mut Env<'_>,
    ) -> MotionResult<()> {
        let rect = env
            .host
            .rect(bounds)
            .ok_or(MotionError::DetachedTarget(bounds))?;
        let hovering = live(&mut self.live)?.hovering;
        if !hovering && !contains_inclusive(rect, client) {
            return Ok(());
        }

        let scale = tilt.unwrap_or(TiltScale::Divisor(env.settings.tilt_divisor));
        let state = normalize_pointer(client, rect, scale)?;
        if !hovering {
            // Mounted under the pointer: the enter event happened before we subscribed.
            self.on_hover(true, env)?;
        }
        live(&mut self.live)?.pointer = Some(state);

        let TimelineSpec::Follow(f) = &self.config.timeline else {
            return Ok(());
        };
        let to: Props = f
            .channels
            .iter()
            .map(|c| (c.property, state.axis(c.source) * c.gain + c.offset))
            .collect();
        if to.is_empty() {
            return Ok(());
        }
        let step = ops::to(
            to,
            f.duration_ms.unwrap_or(env.settings.follow_duration_ms),
            f.ease.unwrap_or(env.settings.follow_ease),
        );
        self.play(env, &[step], Repeat::Once)
    }

    fn on_hover(&mut self, entering: bool, env: &mut Env<'_>) -> MotionResult<()> {
        let live = live(&mut self.live)?;
        if live.hovering == entering {
            return Ok(());
        }
        live.hovering = entering;
        if !entering {
            live.pointer = None;
        }

        match (&self.config.timeline, entering) {
            (TimelineSpec::Follow(f), true) => self.settle(env, &f.enter, f.settle_ms),
            (TimelineSpec::Follow(f), false) => self.settle(env, &f.rest, f.settle_ms),
            (TimelineSpec::Timed(t), true) => {
                live.played = true;
                self.play(env, &t.steps, t.repeat)
            }
            (TimelineSpec::Timed(t), false) => self.settle(env, &t.rest, t.settle_ms),
            (TimelineSpec::Scrubbed(_), _) => Ok(()),
        }
    }

    fn on_intersection(&mut self, ratio: f64, once: bool, env: &mut Env<'_>) -> MotionResult<()> {
        if self.state == BindingState::Subscribing {
            self.state = BindingState::Active;
            tracing::debug!(binding = ?self.id, "observer confirmed");
        }
        let live = live(&mut self.live)?;
        let Some(tracker) = live.visibility.as_mut() else {
            return Ok(());
        };
        let sample = tracker.observe(ratio)?;

        if let TimelineSpec::Scrubbed(_) = self.config.timeline {
            return self.retarget_progress(sample.ratio, env);
        }
        let TimelineSpec::Timed(t) = &self.config.timeline else {
            return Ok(());
        };
        match sample.edge {
            VisibilityEdge::Entered if !(once && live.played) => {
                live.played = true;
                self.play(env, &t.steps, t.repeat)
            }
            VisibilityEdge::Exited if t.repeat != Repeat::Once => {
                self.settle(env, &t.rest, t.settle_ms)
            }
            _ => Ok(()),
        }
    }

    fn on_frame(&mut self, env: &mut Env<'_>) -> MotionResult<()> {
        let now = env.host.now_ms();
        let live = live(&mut self.live)?;
        if live.scrub.is_none() {
            return Ok(());
        }
        if let Some(p) = live.smoother.advance(now) {
            self.apply_progress(p, env)?;
        }
        if self.is_settling() {
            env.host.request_frame();
        }
        Ok(())
    }
}

fn live(live: &mut Option<Live>) -> MotionResult<&mut Live> {
    live.as_mut()
        .ok_or_else(|| MotionError::animation("binding has no live state"))
}

#[cfg(test)]
#[path = "../../tests/unit/binding/lifecycle.rs"]
mod tests;
