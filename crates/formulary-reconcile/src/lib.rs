//! Formulary reconciliation.
//!
//! Merges a master formulary template with a facility formulary on
//! normalized drug names. The template decides the output shape; the
//! facility contributes which drugs survive and the notes folded into the
//! prescribing restrictions.
//!
//! # Example
//!
//! ```ignore
//! use formulary_model::ReconcileOptions;
//! use formulary_normalize::Normalizer;
//! use formulary_reconcile::reconcile;
//!
//! let result = reconcile(&template, &facility, Normalizer::builtin(), &ReconcileOptions::default())?;
//! println!("Total medications matched: {}", result.matched());
//! ```

mod error;
mod facility;
mod merge;
mod notes;
mod reconcile;

pub use error::{ReconcileError, Result};
pub use facility::{FacilityEntry, facility_entries};
pub use merge::merge_restriction;
pub use notes::AggregatedNotes;
pub use reconcile::{ReconcileStats, Reconciliation, reconcile};
