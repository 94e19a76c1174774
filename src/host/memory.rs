use std::collections::{BTreeMap, btree_map::Entry};

use crate::{
    animation::property::{Property, Props},
    foundation::{
        core::{ElementId, Rect, Size, SubscriptionId},
        error::{MotionError, MotionResult},
    },
    host::{EventSource, Host},
};

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryElement {
    /// Document coordinates (viewport coordinates when `fixed`).
    pub rect: Rect,
    pub fixed: bool,
    pub attached: bool,
    pub props: Props,
}

/// One applied property write, in application order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertyWrite {
    pub at_ms: f64,
    pub element: ElementId,
    pub property: Property,
    pub value: f64,
}

/// In-memory document: element boxes, a scroll offset, a clock, and a log of every write.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    now_ms: f64,
    scroll_y: f64,
    viewport: Size,
    elements: BTreeMap<ElementId, MemoryElement>,
    subscriptions: BTreeMap<SubscriptionId, EventSource>,
    next_subscription: u64,
    writes: Vec<PropertyWrite>,
    frame_requested: bool,
}

impl MemoryHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            now_ms: 0.0,
            scroll_y: 0.0,
            viewport,
            elements: BTreeMap::new(),
            subscriptions: BTreeMap::new(),
            next_subscription: 0,
            writes: Vec::new(),
            frame_requested: false,
        }
    }

    /// Insert (or replace) an attached element at document position `rect`.
    pub fn insert(&mut self, id: ElementId, rect: Rect) -> &mut MemoryElement {
        let el = MemoryElement {
            rect,
            fixed: false,
            attached: true,
            props: Props::new(),
        };
        match self.elements.entry(id) {
            Entry::Occupied(mut slot) => {
                slot.insert(el);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(el),
        }
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut MemoryElement> {
        self.elements.get_mut(&id)
    }

    pub fn element_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.keys().copied()
    }

    /// Remove an element from the document, keeping its last values for inspection.
    pub fn detach(&mut self, id: ElementId) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.attached = false;
        }
    }

    pub fn set_scroll(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms.max(0.0);
    }

    pub fn props(&self, id: ElementId) -> Option<&Props> {
        self.elements.get(&id).map(|el| &el.props)
    }

    pub fn value(&self, id: ElementId, prop: Property) -> Option<f64> {
        self.props(id).and_then(|p| p.get(prop))
    }

    pub fn writes(&self) -> &[PropertyWrite] {
        &self.writes
    }

    pub fn take_writes(&mut self) -> Vec<PropertyWrite> {
        std::mem::take(&mut self.writes)
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = (SubscriptionId, EventSource)> + '_ {
        self.subscriptions.iter().map(|(id, s)| (*id, *s))
    }

    /// Consume a pending frame request.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

impl Host for MemoryHost {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn rect(&self, element: ElementId) -> Option<Rect> {
        let el = self.elements.get(&element).filter(|el| el.attached)?;
        if el.fixed {
            Some(el.rect)
        } else {
            Some(el.rect + kurbo::Vec2::new(0.0, -self.scroll_y))
        }
    }

    fn read(&self, element: ElementId, prop: Property) -> Option<f64> {
        self.value(element, prop)
    }

    fn write(&mut self, element: ElementId, prop: Property, value: f64) -> MotionResult<()> {
        let el = self
            .elements
            .get_mut(&element)
            .filter(|el| el.attached)
            .ok_or(MotionError::DetachedTarget(element))?;
        el.props.set(prop, value);
        self.writes.push(PropertyWrite {
            at_ms: self.now_ms,
            element,
            property: prop,
            value,
        });
        Ok(())
    }

    fn subscribe(&mut self, source: EventSource) -> MotionResult<SubscriptionId> {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscriptions.insert(id, source);
        Ok(id)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
