//! CLI command implementations.

pub(crate) mod dump;
pub(crate) mod run;
