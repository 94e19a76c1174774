pub(crate) mod animator;
pub(crate) mod ownership;
pub(crate) mod scrub;
pub(crate) mod tween;
