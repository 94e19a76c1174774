use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::ElementId,
        error::{MotionError, MotionResult},
    },
    host::Host,
    trigger::visibility::{RootMargin, VisibilityEdge, VisibilityTracker, intersection_ratio},
};

/// Which page section is "current" for navigation highlighting.
///
/// Each section is observed at `threshold`; the most recent one to cross into view becomes
/// active and stays active until another one enters.
#[derive(Clone, Debug)]
pub struct SectionTracker {
    root_margin: RootMargin,
    names: BTreeMap<ElementId, String>,
    trackers: BTreeMap<ElementId, VisibilityTracker>,
    active: Option<ElementId>,
}

impl SectionTracker {
    pub const THRESHOLD: f64 = 0.2;

    pub fn new<S: Into<String>>(sections: impl IntoIterator<Item = (ElementId, S)>) -> Self {
        let names: BTreeMap<ElementId, String> = sections
            .into_iter()
            .map(|(id, name)| (id, name.into()))
            .collect();
        let trackers = names
            .keys()
            .map(|&id| (id, VisibilityTracker::new(Self::THRESHOLD)))
            .collect();
        Self {
            // Ignore a fixed 80px band at the top and bottom (navbar and footer).
            root_margin: RootMargin::vertical(-80.0),
            names,
            trackers,
            active: None,
        }
    }

    pub fn with_root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    pub fn active(&self) -> Option<&str> {
        self.active
            .and_then(|id| self.names.get(&id))
            .map(String::as_str)
    }

    pub fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    /// Feed one observer callback. Returns `true` when the active section changed.
    pub fn observe(&mut self, section: ElementId, ratio: f64) -> MotionResult<bool> {
        let tracker = self.trackers.get_mut(&section).ok_or_else(|| {
            MotionError::configuration(format!("element {section} is not a tracked section"))
        })?;
        let sample = tracker.observe(ratio)?;
        if sample.edge != VisibilityEdge::Entered || self.active == Some(section) {
            return Ok(false);
        }
        tracing::debug!(%section, name = ?self.names.get(&section), "active section");
        self.active = Some(section);
        Ok(true)
    }

    /// Recompute every section's ratio from `host` geometry. Detached or unmeasurable sections
    /// are skipped.
    pub fn update(&mut self, host: &dyn Host) -> MotionResult<bool> {
        let viewport = host.viewport();
        let ids: Vec<ElementId> = self.trackers.keys().copied().collect();
        let mut changed = false;
        for id in ids {
            let Some(rect) = host.rect(id) else {
                continue;
            };
            let Ok(ratio) = intersection_ratio(rect, viewport, self.root_margin) else {
                continue;
            };
            changed |= self.observe(id, ratio)?;
        }
        Ok(changed)
    }
}

#[cfg(test)]
#[path = "../tests/unit/sections.rs"]
mod tests;
