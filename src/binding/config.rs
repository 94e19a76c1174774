use crate::{
    animation::timeline::{Repeat, TimelineSpec},
    foundation::{
        core::ElementId,
        error::{MotionError, MotionResult},
    },
    trigger::spec::TriggerSpec,
};

/// Everything needed to create a binding: one trigger, one timeline, one target.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BindingConfig {
    pub trigger: TriggerSpec,
    pub timeline: TimelineSpec,
    pub target: ElementId,
}

impl BindingConfig {
    pub fn new(trigger: TriggerSpec, timeline: TimelineSpec, target: ElementId) -> Self {
        Self {
            trigger,
            timeline,
            target,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        self.trigger.validate()?;
        self.timeline.validate()?;

        let paired = matches!(
            (&self.trigger, &self.timeline),
            (TriggerSpec::ScrollRegion { .. }, TimelineSpec::Scrubbed(_))
                | (TriggerSpec::ScrollRegion { .. }, TimelineSpec::Timed(_))
                | (TriggerSpec::PointerWithin { .. }, TimelineSpec::Follow(_))
                | (TriggerSpec::PointerWithin { .. }, TimelineSpec::Timed(_))
                | (TriggerSpec::VisibilityThreshold { .. }, TimelineSpec::Scrubbed(_))
                | (TriggerSpec::VisibilityThreshold { .. }, TimelineSpec::Timed(_))
        );
        if !paired {
            return Err(MotionError::configuration(format!(
                "a {} trigger cannot drive a {} timeline",
                self.trigger.kind_name(),
                self.timeline.kind_name()
            )));
        }

        // A loop can only be deactivated into a defined state if `rest` covers what it animates.
        if let TimelineSpec::Timed(t) = &self.timeline
            && t.repeat != Repeat::Once
        {
            for step in &t.steps {
                if let Some(p) = step.to.keys().find(|p| !t.rest.contains(*p)) {
                    return Err(MotionError::configuration(format!(
                        "repeating timeline animates {p:?} but has no rest value for it"
                    )));
                }
            }
        }
        Ok(())
    }
}
