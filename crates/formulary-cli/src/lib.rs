//! CLI library components for the formulary reconciler.

pub mod logging;
pub mod pipeline;
