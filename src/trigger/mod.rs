pub(crate) mod pointer;
pub(crate) mod scroll;
pub(crate) mod spec;
pub(crate) mod visibility;
