//! Shared data model for formulary reconciliation.
//!
//! Holds the vocabulary every other crate speaks: which input a table came
//! from, the canonical column names, and the options that bind source
//! columns to those names.

pub mod columns;
pub mod options;
pub mod role;

pub use options::ReconcileOptions;
pub use role::SourceRole;
