//! The environment a stage runs against: geometry, scroll, property storage, subscriptions and
//! frame scheduling. Browser glue implements [`Host`]; [`MemoryHost`] is the in-memory version used
//! by tests, replays and the CLI.

pub(crate) mod memory;
pub(crate) mod script;

use crate::{
    animation::property::Property,
    foundation::core::{ElementId, Point, Rect, Size, SubscriptionId},
    foundation::error::MotionResult,
};

/// Event stream a binding listens to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventSource {
    Scroll,
    Pointer { element: ElementId },
    Intersection { element: ElementId, threshold: f64 },
}

/// Raw event delivered by the host. Payload-free events read their state back from the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    Scroll,
    PointerMove { x: f64, y: f64 },
    PointerEnter { element: ElementId },
    PointerLeave { element: ElementId },
    Intersection { element: ElementId, ratio: f64 },
    Frame,
}

impl HostEvent {
    pub fn pointer(p: Point) -> Self {
        Self::PointerMove { x: p.x, y: p.y }
    }
}

pub trait Host {
    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> f64;

    fn scroll_y(&self) -> f64;

    fn viewport(&self) -> Size;

    /// Viewport-relative bounding rectangle, `None` when the element is not in the document.
    fn rect(&self, element: ElementId) -> Option<Rect>;

    fn is_attached(&self, element: ElementId) -> bool {
        self.rect(element).is_some()
    }

    /// Current value of an animated property, `None` if never written.
    fn read(&self, element: ElementId, prop: Property) -> Option<f64>;

    /// Fails with [`MotionError::DetachedTarget`](crate::MotionError::DetachedTarget) for elements
    /// outside the document.
    fn write(&mut self, element: ElementId, prop: Property, value: f64) -> MotionResult<()>;

    fn subscribe(&mut self, source: EventSource) -> MotionResult<SubscriptionId>;

    /// Returns whether `id` was live.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Ask for a [`HostEvent::Frame`] on the next redraw.
    fn request_frame(&mut self);
}
