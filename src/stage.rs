use std::collections::BTreeMap;

use crate::{
    binding::{
        Env,
        config::BindingConfig,
        lifecycle::{Binding, BindingState},
    },
    foundation::{
        core::BindingId,
        error::{MotionError, MotionResult},
    },
    host::{Host, HostEvent},
    player::animator::Animator,
    runtime::settings::{self, Settings},
};

/// Per-page coordinator: owns every binding plus the shared [`Animator`] and routes host events.
///
/// Each call takes the host explicitly, so one stage never holds on to the document between calls.
#[derive(Debug)]
pub struct Stage {
    bindings: BTreeMap<BindingId, Binding>,
    animator: Animator,
    settings: Settings,
    next_id: u64,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    /// A stage using the process-wide [`settings`](crate::settings).
    pub fn new() -> Self {
        Self::with_settings(settings::settings().clone())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            bindings: BTreeMap::new(),
            animator: Animator::new(),
            settings,
            next_id: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Create a binding and bind it. A config or attach failure leaves the binding inert, with
    /// the cause available through [`Stage::error`].
    #[tracing::instrument(level = "debug", skip_all, fields(target = %config.target))]
    pub fn mount(&mut self, config: BindingConfig, host: &mut dyn Host) -> BindingId {
        self.next_id += 1;
        let id = BindingId(self.next_id);
        self.bindings.insert(id, Binding::new(id, config));
        self.bind(id, host);
        id
    }

    /// Bind an unbound binding again. Returns the resulting state, `None` for unknown ids.
    #[tracing::instrument(level = "debug", skip(self, host))]
    pub fn bind(&mut self, id: BindingId, host: &mut dyn Host) -> Option<BindingState> {
        self.with_binding(id, host, |binding, env| {
            if let Err(err) = binding.bind(env) {
                binding.contain(err, env);
            }
            binding.state()
        })
    }

    /// Tear down and bind with `config`.
    #[tracing::instrument(level = "debug", skip(self, config, host))]
    pub fn rebind(
        &mut self,
        id: BindingId,
        config: BindingConfig,
        host: &mut dyn Host,
    ) -> Option<BindingState> {
        self.with_binding(id, host, |binding, env| {
            if let Err(err) = binding.rebind(config, env) {
                binding.contain(err, env);
            }
            binding.state()
        })
    }

    /// Idempotent: `false` when the binding is unknown or already unbound.
    #[tracing::instrument(level = "debug", skip(self, host))]
    pub fn teardown(&mut self, id: BindingId, host: &mut dyn Host) -> bool {
        self.with_binding(id, host, |binding, env| binding.teardown(env))
            .unwrap_or(false)
    }

    /// Tear down exactly once and forget the binding.
    #[tracing::instrument(level = "debug", skip(self, host))]
    pub fn unmount(&mut self, id: BindingId, host: &mut dyn Host) -> bool {
        if self.bindings.contains_key(&id) {
            self.teardown(id, host);
        }
        self.bindings.remove(&id).is_some()
    }

    /// Return a time-driven binding to its rest values.
    pub fn settle(&mut self, id: BindingId, host: &mut dyn Host) -> Option<BindingState> {
        self.with_binding(id, host, |binding, env| {
            if let Err(err) = binding.settle_to_rest(env) {
                binding.contain(err, env);
            }
            binding.state()
        })
    }

    /// Route one event to every binding in id order, then advance players on `Frame`.
    pub fn dispatch(&mut self, event: HostEvent, host: &mut dyn Host) {
        let Self {
            bindings,
            animator,
            settings,
            ..
        } = self;
        let mut env = Env {
            host,
            animator,
            settings,
        };
        for binding in bindings.values_mut() {
            if let Err(err) = binding.handle(event, &mut env) {
                binding.contain(err, &mut env);
            }
        }

        if event != HostEvent::Frame {
            return;
        }
        for id in env.animator.tick(&mut *env.host) {
            if let Some(binding) = bindings.get_mut(&id) {
                let target = binding.config().target;
                binding.teardown(&mut env);
                binding.record_error(MotionError::DetachedTarget(target));
            }
        }
        if bindings.values().any(Binding::is_settling) {
            env.host.request_frame();
        }
    }

    pub fn status(&self, id: BindingId) -> Option<BindingState> {
        self.bindings.get(&id).map(Binding::state)
    }

    pub fn error(&self, id: BindingId) -> Option<&MotionError> {
        self.bindings.get(&id).and_then(Binding::error)
    }

    pub fn config(&self, id: BindingId) -> Option<&BindingConfig> {
        self.bindings.get(&id).map(Binding::config)
    }

    pub fn binding(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = BindingId> + '_ {
        self.bindings.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Nothing running and no smoothing left to converge.
    pub fn is_idle(&self) -> bool {
        !self.animator.is_busy() && !self.bindings.values().any(Binding::is_settling)
    }

    /// Validate every mounted config without touching the host.
    pub fn check(&self) -> MotionResult<()> {
        for (id, binding) in &self.bindings {
            binding.config().validate().map_err(|err| {
                MotionError::configuration(format!("binding {}: {err}", id.0))
            })?;
        }
        Ok(())
    }

    fn with_binding<R>(
        &mut self,
        id: BindingId,
        host: &mut dyn Host,
        f: impl FnOnce(&mut Binding, &mut Env<'_>) -> R,
    ) -> Option<R> {
        let binding = self.bindings.get_mut(&id)?;
        let mut env = Env {
            host,
            animator: &mut self.animator,
            settings: &self.settings,
        };
        Some(f(binding, &mut env))
    }
}

#[cfg(test)]
#[path = "../tests/unit/stage.rs"]
mod tests;
