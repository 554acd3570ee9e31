//! Noise vocabulary: whole-word terms stripped from drug names.
//!
//! The vocabulary is the only tunable part of name matching. Changing it
//! changes which template and facility rows end up sharing a key, so every
//! vocabulary carries a version label that is logged with each run.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};

/// Version label of [`BUILTIN_TERMS`].
pub const BUILTIN_VERSION: &str = "1";

/// Built-in noise terms: dosage forms, units, salts and connector words.
///
/// Order matters. Terms are tried left to right at each position, so a
/// shorter term listed before a longer one (`powder` before
/// `powder for injection`) wins.
pub const BUILTIN_TERMS: &[&str] = &[
    "tablet",
    "injection",
    "suspension",
    "syrup",
    "mixture",
    "hcl",
    "hydrochloride",
    "mg",
    "ml",
    "mcg",
    "iu",
    "%",
    "solution",
    "cream",
    "ointment",
    "powder",
    "for",
    "and",
    "&",
    "activated",
    "besylate",
    "sodium",
    "potassium",
    "phosphate",
    "acetate",
    "maleate",
    "tartrate",
    "succinate",
    "capsule",
    "cap",
    "tab",
    "inj",
    "soln",
    "oint",
    "syr",
    "susp",
    "powder for injection",
    "solution for injection",
    "eye drops",
    "ear drops",
    "nasal spray",
];

/// An ordered, versioned list of noise terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseVocabulary {
    pub version: String,
    pub terms: Vec<String>,
}

impl Default for NoiseVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NoiseVocabulary {
    pub fn new(version: impl Into<String>, terms: Vec<String>) -> Self {
        Self {
            version: version.into(),
            terms,
        }
    }

    /// The vocabulary shipped with the tool.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_VERSION,
            BUILTIN_TERMS.iter().map(|term| (*term).to_string()).collect(),
        )
    }

    /// Parse a vocabulary from JSON text: `{"version": "...", "terms": [...]}`.
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self> {
        let vocabulary: Self =
            serde_json::from_str(json).map_err(|source| NormalizeError::VocabularyParse {
                path: origin.to_path_buf(),
                source,
            })?;
        if vocabulary.version.trim().is_empty() {
            return Err(NormalizeError::MissingVersion);
        }
        Ok(vocabulary)
    }

    /// Load a vocabulary from a JSON file.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| NormalizeError::VocabularyRead {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary = Self::from_json_str(&json, path)?;
        tracing::debug!(
            path = %path.display(),
            version = %vocabulary.version,
            terms = vocabulary.terms.len(),
            "loaded noise vocabulary"
        );
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.iter().all(|term| term.trim().is_empty())
    }

    /// Compile the vocabulary into one whole-word alternation.
    ///
    /// Returns `None` when there is nothing to remove. Terms are escaped, so
    /// symbols such as `%` and `&` are matched literally.
    pub fn compile(&self) -> Result<Option<Regex>> {
        let alternatives: Vec<String> = self
            .terms
            .iter()
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Ok(None);
        }
        let pattern = format!(r"(?i)\b({})\b", alternatives.join("|"));
        Ok(Some(Regex::new(&pattern)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_versioned() {
        let vocabulary = NoiseVocabulary::builtin();
        assert_eq!(vocabulary.version, BUILTIN_VERSION);
        assert_eq!(vocabulary.len(), BUILTIN_TERMS.len());
        assert!(vocabulary.terms.iter().any(|term| term == "eye drops"));
    }

    #[test]
    fn compiled_pattern_matches_whole_words_only() {
        let pattern = NoiseVocabulary::builtin().compile().unwrap().unwrap();
        assert!(pattern.is_match("paracetamol tablet"));
        assert!(!pattern.is_match("tabletx"));
        assert!(pattern.is_match("EYE DROPS"));
    }

    #[test]
    fn symbols_are_escaped() {
        let vocabulary = NoiseVocabulary::new("t", vec!["a+b".to_string(), "(x)".to_string()]);
        let pattern = vocabulary.compile().unwrap().unwrap();
        assert!(!pattern.is_match("aab"));
    }

    #[test]
    fn blank_terms_compile_to_nothing() {
        let vocabulary = NoiseVocabulary::new("empty", vec![" ".to_string(), String::new()]);
        assert!(vocabulary.is_empty());
        assert!(vocabulary.compile().unwrap().is_none());
    }

    #[test]
    fn parses_json() {
        let vocabulary = NoiseVocabulary::from_json_str(
            r#"{"version": "2024-06", "terms": ["tablet", "vial"]}"#,
            Path::new("inline.json"),
        )
        .unwrap();
        assert_eq!(vocabulary.version, "2024-06");
        assert_eq!(vocabulary.terms, vec!["tablet", "vial"]);
    }

    #[test]
    fn rejects_blank_version() {
        let err = NoiseVocabulary::from_json_str(
            r#"{"version": "  ", "terms": []}"#,
            Path::new("inline.json"),
        )
        .unwrap_err();
        assert!(matches!(err, NormalizeError::MissingVersion));
    }

    #[test]
    fn rejects_malformed_json() {
        let err =
            NoiseVocabulary::from_json_str(r#"{"terms": "tablet"}"#, Path::new("bad.json"))
                .unwrap_err();
        assert!(matches!(err, NormalizeError::VocabularyParse { .. }));
    }
}
