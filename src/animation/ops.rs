use crate::animation::{
    ease::Ease,
    property::Props,
    timeline::Step,
};

/// Tween toward `to`, starting from wherever the element is.
pub fn to(to: Props, span: f64, ease: Ease) -> Step {
    Step {
        from: Props::new(),
        to,
        ease,
        span,
    }
}

pub fn from_to(from: Props, to: Props, span: f64, ease: Ease) -> Step {
    Step {
        from,
        to,
        ease,
        span,
    }
}

/// A step that writes nothing for `span`.
pub fn hold(span: f64) -> Step {
    to(Props::new(), span, Ease::Linear)
}

/// Shift a sequence later by prepending a hold.
pub fn delay(mut steps: Vec<Step>, by: f64) -> Vec<Step> {
    if by > 0.0 {
        steps.insert(0, hold(by));
    }
    steps
}

/// `step` followed by its mirror image, returning to the start values.
///
/// The start values must be explicit: a mirror of "wherever the element is" has nowhere to return.
pub fn yoyo(step: Step) -> Vec<Step> {
    let back = Step {
        from: step.to.clone(),
        to: step.from.clone(),
        ease: step.ease,
        span: step.span,
    };
    vec![step, back]
}
