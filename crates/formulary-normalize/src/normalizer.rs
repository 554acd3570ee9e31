//! Drug name normalizer.

use std::sync::LazyLock;

use crate::error::Result;
use crate::rules::{RuleSet, RuleTrace};
use crate::vocabulary::NoiseVocabulary;

static BUILTIN: LazyLock<Normalizer> = LazyLock::new(|| {
    Normalizer::new(&NoiseVocabulary::builtin()).expect("Invalid built-in noise vocabulary")
});

/// Turns free-text drug names into canonical join keys.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: RuleSet,
    vocabulary_version: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl Normalizer {
    /// Build the standard rule set around a vocabulary.
    pub fn new(vocabulary: &NoiseVocabulary) -> Result<Self> {
        Ok(Self {
            rules: RuleSet::standard(vocabulary)?,
            vocabulary_version: vocabulary.version.clone(),
        })
    }

    /// Use a custom rule set.
    pub fn with_rules(rules: RuleSet, vocabulary_version: impl Into<String>) -> Self {
        Self {
            rules,
            vocabulary_version: vocabulary_version.into(),
        }
    }

    /// The shared normalizer built from the built-in vocabulary.
    pub fn builtin() -> &'static Normalizer {
        &BUILTIN
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn vocabulary_version(&self) -> &str {
        &self.vocabulary_version
    }

    /// Canonical key for a name. May be empty; empty keys never match.
    ///
    /// Stripping punctuation or collapsing spaces can expose a new whole-word
    /// noise term (`"c.ap"` becomes `"cap"`, `"eye cap drops"` becomes
    /// `"eye drops"`), so the rules are re-applied until the output stops
    /// changing. After the first pass every rule only deletes characters,
    /// which bounds the loop by the key length.
    pub fn normalize(&self, name: &str) -> String {
        let mut current = self.rules.apply(name);
        loop {
            let next = self.rules.apply(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Canonical key for a possibly missing value. Missing yields `""`.
    pub fn normalize_value(&self, name: Option<&str>) -> String {
        name.map(|value| self.normalize(value)).unwrap_or_default()
    }

    /// Intermediate values of every pass that changed the name, one per rule.
    ///
    /// The last entry's output equals [`Normalizer::normalize`].
    pub fn trace(&self, name: &str) -> Vec<RuleTrace> {
        let mut steps = self.rules.trace(name, 1);
        let mut current = steps
            .last()
            .map_or_else(|| name.to_string(), |step| step.output.clone());
        let mut pass = 1;
        loop {
            let next = self.rules.apply(&current);
            if next == current {
                return steps;
            }
            pass += 1;
            steps.extend(self.rules.trace(&current, pass));
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::NormalizationRule;

    #[test]
    fn builtin_version() {
        assert_eq!(Normalizer::builtin().vocabulary_version(), "1");
    }

    #[test]
    fn missing_value_is_empty() {
        assert_eq!(Normalizer::builtin().normalize_value(None), "");
        assert_eq!(
            Normalizer::builtin().normalize_value(Some("Aspirin 100mg")),
            "aspirin"
        );
    }

    #[test]
    fn exposed_noise_word_is_removed() {
        let normalizer = Normalizer::builtin();
        assert_eq!(normalizer.rules().apply("c.ap"), "cap");
        assert_eq!(normalizer.normalize("c.ap"), "");
        assert_eq!(normalizer.normalize("Vitamin B.tab"), "vitamin b");
    }

    #[test]
    fn trace_follows_every_pass() {
        let normalizer = Normalizer::builtin();
        let steps = normalizer.trace("c.ap");
        let last = steps.last().unwrap();
        assert_eq!(last.output, normalizer.normalize("c.ap"));
        assert_eq!(last.pass, 2);
        assert_eq!(steps.len(), 2 * normalizer.rules().len());
    }

    #[test]
    fn trace_of_stable_name_is_one_pass() {
        let normalizer = Normalizer::builtin();
        let steps = normalizer.trace("Paracetamol 500mg Tablet");
        assert_eq!(steps.len(), normalizer.rules().len());
        assert!(steps.iter().all(|step| step.pass == 1));
        assert_eq!(steps.last().unwrap().output, "paracetamol");
    }

    #[test]
    fn custom_rules_are_used() {
        let rules = RuleSet::new()
            .add_rule(NormalizationRule::Lowercase)
            .add_rule(NormalizationRule::CollapseWhitespace);
        let normalizer = Normalizer::with_rules(rules, "lowercase-only");
        assert_eq!(normalizer.normalize("  Paracetamol   500MG "), "paracetamol 500mg");
        assert_eq!(normalizer.vocabulary_version(), "lowercase-only");
    }

    #[test]
    fn custom_vocabulary_changes_matching() {
        let vocabulary = NoiseVocabulary::new("vials", vec!["vial".to_string()]);
        let normalizer = Normalizer::new(&vocabulary).unwrap();
        assert_eq!(normalizer.normalize("Ceftriaxone Vial"), "ceftriaxone");
        assert_eq!(normalizer.normalize("Ceftriaxone Injection"), "ceftriaxone injection");
    }
}
