pub(crate) mod config;
pub(crate) mod lifecycle;

use crate::{host::Host, player::animator::Animator, runtime::settings::Settings};

/// What a binding needs from its stage while handling one call.
pub(crate) struct Env<'a> {
    pub host: &'a mut dyn Host,
    pub animator: &'a mut Animator,
    pub settings: &'a Settings,
}
