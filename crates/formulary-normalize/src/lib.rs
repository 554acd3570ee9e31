//! Drug name normalization.
//!
//! Free-text drug names from independently maintained spreadsheets are
//! reduced to a canonical key so that `"Paracetamol 500mg Tablet"` and
//! `"paracetamol"` land on the same row. The reduction is an ordered
//! [`RuleSet`]; the only tunable input is the [`NoiseVocabulary`].
//!
//! # Example
//!
//! ```
//! use formulary_normalize::normalize;
//!
//! assert_eq!(normalize("Amoxicillin 500mg Capsule"), "amoxicillin");
//! assert_eq!(normalize("Paracetamol (500mg)"), "paracetamol");
//! assert_eq!(normalize("XYZ###"), "xyz");
//! ```

mod error;
mod normalizer;
mod rules;
mod vocabulary;

pub use error::{NormalizeError, Result};
pub use normalizer::Normalizer;
pub use rules::{NormalizationRule, RuleSet, RuleTrace};
pub use vocabulary::{BUILTIN_TERMS, BUILTIN_VERSION, NoiseVocabulary};

/// Normalize a name with the built-in vocabulary.
pub fn normalize(name: &str) -> String {
    Normalizer::builtin().normalize(name)
}
