use std::collections::BTreeMap;

use crate::{
    animation::{
        property::{Property, Props},
        timeline::{Repeat, Step},
    },
    foundation::{
        core::{BindingId, ElementId, PlayerId},
        error::{MotionError, MotionResult},
    },
    host::Host,
    player::{ownership::Ownership, tween::TweenPlayer},
};

/// Every producer of property writes on a stage: running tweens plus scrub producers.
///
/// All writes pass the ownership table. Starting a producer claims its properties, which
/// synchronously drops any producer left owning nothing, so two producers never alternate on the
/// same property.
#[derive(Debug, Default)]
pub struct Animator {
    players: BTreeMap<PlayerId, TweenPlayer>,
    producers: BTreeMap<PlayerId, (BindingId, ElementId)>,
    owners: Ownership,
    next_id: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a producer that writes `props` through [`Animator::write`], claiming them now.
    pub fn producer(
        &mut self,
        binding: BindingId,
        target: ElementId,
        props: impl IntoIterator<Item = Property>,
    ) -> PlayerId {
        let id = self.register(binding, target);
        self.supersede(target, props, id);
        tracing::debug!(?binding, ?id, %target, "producer registered");
        id
    }

    fn register(&mut self, binding: BindingId, target: ElementId) -> PlayerId {
        self.next_id += 1;
        let id = PlayerId(self.next_id);
        self.producers.insert(id, (binding, target));
        id
    }

    /// Start a time-driven player on `target` and apply its first frame.
    pub fn play(
        &mut self,
        host: &mut dyn Host,
        binding: BindingId,
        target: ElementId,
        steps: &[Step],
        repeat: Repeat,
    ) -> MotionResult<PlayerId> {
        let id = self.register(binding, target);
        let tween = {
            let reader: &dyn Host = host;
            TweenPlayer::start(steps, repeat, reader.now_ms(), |p| {
                reader.read(target, p).unwrap_or_else(|| p.identity())
            })
        };
        let props: Vec<Property> = tween.properties().collect();
        self.supersede(target, props, id);
        self.players.insert(id, tween);
        tracing::debug!(?binding, ?id, %target, "player started");

        self.step(id, host)?;
        if self.is_busy() {
            host.request_frame();
        }
        Ok(id)
    }

    /// Write the subset of `props` that `producer` still owns.
    ///
    /// A superseded producer has been dropped and writes nothing. Returns whether any value was
    /// written.
    pub fn write(
        &self,
        host: &mut dyn Host,
        producer: PlayerId,
        props: &Props,
    ) -> MotionResult<bool> {
        let Some(&(_, target)) = self.producers.get(&producer) else {
            return Ok(false);
        };
        let mut wrote = false;
        for (p, v) in props.iter() {
            if !self.owners.owns(target, p, producer) {
                continue;
            }
            host.write(target, p, v)?;
            wrote = true;
        }
        Ok(wrote)
    }

    pub fn is_registered(&self, id: PlayerId) -> bool {
        self.producers.contains_key(&id)
    }

    fn supersede(
        &mut self,
        target: ElementId,
        props: impl IntoIterator<Item = Property>,
        id: PlayerId,
    ) {
        for displaced in self.owners.claim(target, props, id) {
            if self.owners.holds_any(displaced) {
                continue;
            }
            if let Some(mut tween) = self.players.remove(&displaced) {
                tween.cancel();
            }
            if self.producers.remove(&displaced).is_some() {
                tracing::debug!(?displaced, by = ?id, "producer superseded");
            }
        }
    }

    /// Advance every running player to the host clock. Returns bindings whose target turned out
    /// to be detached.
    pub fn tick(&mut self, host: &mut dyn Host) -> Vec<BindingId> {
        let mut detached = Vec::new();
        let ids: Vec<PlayerId> = self.players.keys().copied().collect();
        for id in ids {
            let binding = self.producers.get(&id).map(|(b, _)| *b);
            match self.step(id, host) {
                Ok(()) => {}
                Err(MotionError::DetachedTarget(el)) => {
                    tracing::debug!(?id, %el, "write to detached element dropped");
                    if let Some(b) = binding {
                        detached.push(b);
                    }
                }
                Err(err) => tracing::warn!(?id, %err, "player failed"),
            }
        }
        if self.is_busy() {
            host.request_frame();
        }
        detached
    }

    fn step(&mut self, id: PlayerId, host: &mut dyn Host) -> MotionResult<()> {
        let Some(&(_, target)) = self.producers.get(&id) else {
            return Ok(());
        };
        let Some(tween) = self.players.get_mut(&id) else {
            return Ok(());
        };
        let sample = tween.sample(host.now_ms());
        let finished = !tween.is_running();

        if let Some(props) = sample {
            for (p, v) in props.iter() {
                if !self.owners.owns(target, p, id) {
                    continue;
                }
                if let Err(err) = host.write(target, p, v) {
                    self.retire(id);
                    return Err(err);
                }
            }
        }
        if finished {
            self.retire(id);
        }
        Ok(())
    }

    fn retire(&mut self, id: PlayerId) {
        if let Some(mut tween) = self.players.remove(&id) {
            tween.cancel();
        }
        self.producers.remove(&id);
        self.owners.release(id);
    }

    /// Cancel and forget every producer of `binding`. Returns how many tweens were still running.
    pub fn cancel_binding(&mut self, binding: BindingId) -> usize {
        let ids: Vec<PlayerId> = self
            .producers
            .iter()
            .filter(|(_, (b, _))| *b == binding)
            .map(|(id, _)| *id)
            .collect();
        let running = ids.iter().filter(|id| self.players.contains_key(id)).count();
        for id in ids {
            self.retire(id);
        }
        running
    }

    pub fn is_busy(&self) -> bool {
        !self.players.is_empty()
    }

    pub fn running(&self) -> usize {
        self.players.len()
    }

    pub fn is_running(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn owner(&self, target: ElementId, prop: Property) -> Option<PlayerId> {
        self.owners.owner(target, prop)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/animator.rs"]
mod tests;
