//! CLI command implementations.

pub(crate) mod fetch;
