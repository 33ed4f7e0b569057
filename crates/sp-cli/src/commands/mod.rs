//! CLI command implementations

pub(crate) mod check;
pub(crate) mod common;
pub(crate) mod ls;
pub(crate) mod ping;
pub(crate) mod practice;
pub(crate) mod prompt;
pub(crate) mod sandbox;
pub(crate) mod schema;
pub(crate) mod setup;
pub(crate) mod show;
pub(crate) mod solution;
pub(crate) mod validate;
