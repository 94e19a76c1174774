use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use anyhow::Context as _;

use crate::{
    animation::property::Props,
    binding::{config::BindingConfig, lifecycle::BindingState},
    foundation::{
        core::{BindingId, ElementId, Rect, Size, SubscriptionId},
        error::{MotionError, MotionResult},
    },
    host::{
        EventSource, Host, HostEvent,
        memory::{MemoryHost, PropertyWrite},
    },
    runtime::settings::Settings,
    stage::Stage,
    trigger::visibility::intersection_ratio,
};

fn default_true() -> bool {
    true
}

fn default_interval_ms() -> f64 {
    16.0
}

/// One element of a scripted document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementDecl {
    pub id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Document coordinates (viewport coordinates when `fixed`).
    pub rect: Rect,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default = "default_true")]
    pub attached: bool,
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
}

/// What happens at one point of a script. Bindings are addressed by their index in
/// [`Script::bindings`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptAction {
    Scroll {
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerEnter {
        element: ElementId,
    },
    PointerLeave {
        element: ElementId,
    },
    /// Explicit observer callback, on top of the ones derived from geometry.
    Intersection {
        element: ElementId,
        ratio: f64,
    },
    Frame,
    /// `count` frames, `interval_ms` apart, starting one interval after the event time.
    Frames {
        count: u32,
        #[serde(default = "default_interval_ms")]
        interval_ms: f64,
    },
    Detach {
        element: ElementId,
    },
    Rebind {
        binding: usize,
        config: BindingConfig,
    },
    Settle {
        binding: usize,
    },
    Unmount {
        binding: usize,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedEvent {
    pub at_ms: f64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

/// A document, the bindings mounted on it and a timestamped event stream.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    pub viewport: Size,
    #[serde(default)]
    pub scroll_y: f64,
    #[serde(default)]
    pub elements: Vec<ElementDecl>,
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

impl Script {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        Ok(script)
    }

    pub fn from_path(path: &Path) -> MotionResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Structural checks plus validation of every binding config.
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(MotionError::configuration(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        let mut seen = BTreeSet::new();
        for el in &self.elements {
            if !seen.insert(el.id) {
                return Err(MotionError::configuration(format!(
                    "element {} declared twice",
                    el.id
                )));
            }
            el.props.validate("element props")?;
        }
        for (i, cfg) in self.bindings.iter().enumerate() {
            cfg.validate()
                .map_err(|err| MotionError::configuration(format!("binding {i}: {err}")))?;
        }

        let mut last = f64::NEG_INFINITY;
        for (i, ev) in self.events.iter().enumerate() {
            if !ev.at_ms.is_finite() || ev.at_ms < last {
                return Err(MotionError::configuration(format!(
                    "event {i}: at_ms must be finite and non-decreasing"
                )));
            }
            last = ev.at_ms;
            match &ev.action {
                ScriptAction::Rebind { binding, config } => {
                    self.binding_index(*binding, i)?;
                    config.validate().map_err(|err| {
                        MotionError::configuration(format!("event {i}: {err}"))
                    })?;
                }
                ScriptAction::Settle { binding } | ScriptAction::Unmount { binding } => {
                    self.binding_index(*binding, i)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn binding_index(&self, index: usize, event: usize) -> MotionResult<()> {
        if index >= self.bindings.len() {
            return Err(MotionError::configuration(format!(
                "event {event}: no binding at index {index}"
            )));
        }
        Ok(())
    }

    /// The document the script starts from.
    pub fn host(&self) -> MemoryHost {
        let mut host = MemoryHost::new(self.viewport);
        host.set_scroll(self.scroll_y);
        for decl in &self.elements {
            let el = host.insert(decl.id, decl.rect);
            el.fixed = decl.fixed;
            el.attached = decl.attached;
            el.props = decl.props.clone();
        }
        host
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BindingSummary {
    pub id: BindingId,
    pub state: BindingState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of [`replay`]: every property write in order plus the final document state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReplayReport {
    pub writes: Vec<PropertyWrite>,
    pub bindings: Vec<BindingSummary>,
    pub final_props: BTreeMap<ElementId, Props>,
    pub active_subscriptions: usize,
}

struct Driver {
    host: MemoryHost,
    stage: Stage,
    ids: Vec<BindingId>,
    /// Last ratio reported to each intersection subscription.
    reported: BTreeMap<SubscriptionId, f64>,
}

impl Driver {
    fn dispatch(&mut self, event: HostEvent) {
        self.stage.dispatch(event, &mut self.host);
    }

    /// Deliver observer callbacks for every intersection subscription whose ratio changed. New
    /// subscriptions always get an initial callback.
    fn observe(&mut self) {
        let margin = self.stage.settings().root_margin;
        let viewport = self.host.viewport();
        let observed: Vec<(SubscriptionId, ElementId)> = self
            .host
            .subscriptions()
            .filter_map(|(id, source)| match source {
                EventSource::Intersection { element, .. } => Some((id, element)),
                _ => None,
            })
            .collect();
        self.reported
            .retain(|id, _| observed.iter().any(|(live, _)| live == id));

        for (id, element) in observed {
            let Some(rect) = self.host.rect(element) else {
                continue;
            };
            let ratio = match intersection_ratio(rect, viewport, margin) {
                Ok(r) => r,
                Err(err) => {
                    tracing::debug!(%element, %err, "no intersection for unmeasurable element");
                    continue;
                }
            };
            if self.reported.get(&id) == Some(&ratio) {
                continue;
            }
            self.reported.insert(id, ratio);
            self.dispatch(HostEvent::Intersection { element, ratio });
        }
    }

    fn binding(&self, index: usize) -> MotionResult<BindingId> {
        self.ids
            .get(index)
            .copied()
            .ok_or_else(|| MotionError::configuration(format!("no binding at index {index}")))
    }

    fn apply(&mut self, action: &ScriptAction) -> MotionResult<()> {
        match action {
            ScriptAction::Scroll { y } => {
                self.host.set_scroll(*y);
                self.dispatch(HostEvent::Scroll);
            }
            ScriptAction::PointerMove { x, y } => {
                self.dispatch(HostEvent::PointerMove { x: *x, y: *y });
            }
            ScriptAction::PointerEnter { element } => {
                self.dispatch(HostEvent::PointerEnter { element: *element });
            }
            ScriptAction::PointerLeave { element } => {
                self.dispatch(HostEvent::PointerLeave { element: *element });
            }
            ScriptAction::Intersection { element, ratio } => {
                self.dispatch(HostEvent::Intersection {
                    element: *element,
                    ratio: *ratio,
                });
            }
            ScriptAction::Frame => self.dispatch(HostEvent::Frame),
            ScriptAction::Frames { count, interval_ms } => {
                for _ in 0..*count {
                    self.host.advance(*interval_ms);
                    self.dispatch(HostEvent::Frame);
                }
            }
            ScriptAction::Detach { element } => self.host.detach(*element),
            ScriptAction::Rebind { binding, config } => {
                let id = self.binding(*binding)?;
                self.stage.rebind(id, config.clone(), &mut self.host);
            }
            ScriptAction::Settle { binding } => {
                let id = self.binding(*binding)?;
                self.stage.settle(id, &mut self.host);
            }
            ScriptAction::Unmount { binding } => {
                let id = self.binding(*binding)?;
                self.stage.unmount(id, &mut self.host);
            }
        }
        Ok(())
    }

    fn report(self, ids: &[BindingId]) -> ReplayReport {
        let bindings = ids
            .iter()
            .map(|&id| BindingSummary {
                id,
                state: self.stage.status(id).unwrap_or(BindingState::Unbound),
                error: self.stage.error(id).map(ToString::to_string),
            })
            .collect();
        let final_props = self
            .host
            .element_ids()
            .filter_map(|id| self.host.props(id).map(|p| (id, p.clone())))
            .filter(|(_, p)| !p.is_empty())
            .collect();
        let active_subscriptions = self.host.active_subscriptions();
        ReplayReport {
            writes: self.host.writes().to_vec(),
            bindings,
            final_props,
            active_subscriptions,
        }
    }
}

/// Run `script` against a fresh [`MemoryHost`] and stage. Deterministic: the same script and
/// settings always produce the same report.
#[tracing::instrument(level = "debug", skip_all, fields(
    elements = script.elements.len(),
    bindings = script.bindings.len(),
    events = script.events.len(),
))]
pub fn replay(script: &Script, settings: Settings) -> MotionResult<ReplayReport> {
    script.validate()?;
    settings.validate()?;

    let mut driver = Driver {
        host: script.host(),
        stage: Stage::with_settings(settings),
        ids: Vec::with_capacity(script.bindings.len()),
        reported: BTreeMap::new(),
    };
    for cfg in &script.bindings {
        let id = driver.stage.mount(cfg.clone(), &mut driver.host);
        driver.ids.push(id);
    }
    driver.observe();

    for ev in &script.events {
        driver.host.set_now(ev.at_ms);
        driver.apply(&ev.action)?;
        driver.observe();
    }

    let ids = driver.ids.clone();
    let report = driver.report(&ids);
    tracing::debug!(
        writes = report.writes.len(),
        active_subscriptions = report.active_subscriptions,
        "replay finished"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/host/script.rs"]
mod tests;
