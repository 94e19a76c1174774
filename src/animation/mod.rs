pub(crate) mod ease;
pub mod ops;
pub(crate) mod property;
pub(crate) mod timeline;
