//! motionbind binds declarative animation timelines to page events.
//!
//! A binding pairs one trigger (scroll region, pointer within bounds, visibility threshold) with
//! one timeline (scrubbed, timed, pointer-follow) and one target element. The public API is
//! stage-oriented:
//!
//! - Describe a [`BindingConfig`] (by hand, from JSON, or with [`presets`])
//! - [`Stage::mount`] it against a [`Host`]
//! - Forward host events with [`Stage::dispatch`]
//! - [`Stage::unmount`] to tear it down; nothing keeps writing afterwards
//!
//! See [`guide`] for the full walkthrough.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod binding;
pub(crate) mod host;
pub(crate) mod player;
pub(crate) mod runtime;
pub(crate) mod trigger;

pub mod guide;
/// Ready-made bindings for common page effects.
pub mod presets;
mod sections;
mod stage;

pub use crate::foundation::core::{
    BindingId, ElementId, PlayerId, Point, Rect, Size, SubscriptionId, Vec2,
};
pub use crate::foundation::error::{MotionError, MotionResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::property::{Lerp, Property, Props};
pub use crate::animation::timeline::{
    Channel, FollowTimeline, Repeat, ScrubbedTimeline, Step, TimedTimeline, TimelineSpec,
};
pub use crate::animation::ops;
pub use crate::binding::config::BindingConfig;
pub use crate::binding::lifecycle::{Binding, BindingState};
pub use crate::host::memory::{MemoryElement, MemoryHost, PropertyWrite};
pub use crate::host::script::{
    BindingSummary, ElementDecl, ReplayReport, Script, ScriptAction, TimedEvent, replay,
};
pub use crate::host::{EventSource, Host, HostEvent};
pub use crate::player::animator::Animator;
pub use crate::player::scrub::{ScrubPlayer, Smoother};
pub use crate::player::tween::{PlayState, TweenPlayer};
pub use crate::runtime::settings::{Settings, init, settings};
pub use crate::sections::SectionTracker;
pub use crate::stage::Stage;
pub use crate::trigger::pointer::{PointerAxis, PointerState, TiltScale, normalize_pointer};
pub use crate::trigger::scroll::{
    Edge, RegionEnd, RegionGeometry, ScrollMarker, pin_offset, scroll_progress,
};
pub use crate::trigger::spec::TriggerSpec;
pub use crate::trigger::visibility::{
    RootMargin, VisibilityEdge, VisibilitySample, VisibilityTracker, intersection_ratio,
};
