//! Ordered text rules that turn a drug name into a join key.
//!
//! # Standard Rule Order
//!
//! 1. **lowercase** - Lowercase the whole name
//! 2. **strip_bracketed** - Drop `[...]`, `(...)` and `{...}` spans (non-greedy)
//! 3. **strip_digits** - Drop every digit
//! 4. **remove_noise_words** - Drop whole-word vocabulary terms in one pass
//! 5. **retain_letters** - Drop everything but `a-z` and whitespace
//! 6. **collapse_whitespace** - Collapse whitespace runs and trim
//!
//! Steps 4 and 5 are order-sensitive: the vocabulary sees punctuation as a
//! word boundary, so `"500mg/5ml"` loses both units before the slash goes.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::vocabulary::NoiseVocabulary;

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[.*?\]|\(.*?\)|\{.*?\}").expect("Invalid bracketed-span regex")
});

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("Invalid digit regex"));

static NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z\s]").expect("Invalid non-letter regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// A single text rewrite.
#[derive(Debug, Clone)]
pub enum NormalizationRule {
    Lowercase,
    StripBracketed,
    StripDigits,
    /// Whole-word alternation compiled from a [`NoiseVocabulary`].
    RemoveNoiseWords(Regex),
    RetainLetters,
    CollapseWhitespace,
}

impl NormalizationRule {
    /// Stable name used for logging and for [`RuleSet::remove_rule`].
    pub fn name(&self) -> &'static str {
        match self {
            NormalizationRule::Lowercase => "lowercase",
            NormalizationRule::StripBracketed => "strip_bracketed",
            NormalizationRule::StripDigits => "strip_digits",
            NormalizationRule::RemoveNoiseWords(_) => "remove_noise_words",
            NormalizationRule::RetainLetters => "retain_letters",
            NormalizationRule::CollapseWhitespace => "collapse_whitespace",
        }
    }

    pub fn apply(&self, input: &str) -> String {
        match self {
            NormalizationRule::Lowercase => input.to_lowercase(),
            NormalizationRule::StripBracketed => BRACKETED.replace_all(input, "").into_owned(),
            NormalizationRule::StripDigits => DIGITS.replace_all(input, "").into_owned(),
            NormalizationRule::RemoveNoiseWords(pattern) => {
                pattern.replace_all(input, "").into_owned()
            }
            NormalizationRule::RetainLetters => NON_LETTER.replace_all(input, "").into_owned(),
            NormalizationRule::CollapseWhitespace => {
                WHITESPACE.replace_all(input, " ").trim().to_string()
            }
        }
    }
}

/// Output of one rule while tracing a name through a [`RuleSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTrace {
    /// 1-based pass over the rule set.
    pub pass: usize,
    pub rule: &'static str,
    pub output: String,
}

/// An ordered list of rules, applied front to back.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<NormalizationRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard rule order with the given vocabulary.
    ///
    /// An empty vocabulary leaves out `remove_noise_words`.
    pub fn standard(vocabulary: &NoiseVocabulary) -> Result<Self> {
        let mut rules = Self::new()
            .add_rule(NormalizationRule::Lowercase)
            .add_rule(NormalizationRule::StripBracketed)
            .add_rule(NormalizationRule::StripDigits);
        if let Some(pattern) = vocabulary.compile()? {
            rules = rules.add_rule(NormalizationRule::RemoveNoiseWords(pattern));
        }
        Ok(rules
            .add_rule(NormalizationRule::RetainLetters)
            .add_rule(NormalizationRule::CollapseWhitespace))
    }

    /// Add a rule to the end of the set.
    pub fn add_rule(mut self, rule: NormalizationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Insert a rule at a specific position.
    pub fn insert_rule(mut self, index: usize, rule: NormalizationRule) -> Self {
        self.rules.insert(index.min(self.rules.len()), rule);
        self
    }

    /// Remove every rule with the given name.
    pub fn remove_rule(mut self, rule_name: &str) -> Self {
        self.rules.retain(|rule| rule.name() != rule_name);
        self
    }

    /// List rule names in execution order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(NormalizationRule::name).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule once, in order.
    pub fn apply(&self, input: &str) -> String {
        self.rules
            .iter()
            .fold(input.to_string(), |value, rule| rule.apply(&value))
    }

    /// Run every rule once, recording each intermediate value under `pass`.
    pub fn trace(&self, input: &str, pass: usize) -> Vec<RuleTrace> {
        let mut value = input.to_string();
        let mut steps = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            value = rule.apply(&value);
            steps.push(RuleTrace {
                pass,
                rule: rule.name(),
                output: value.clone(),
            });
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> RuleSet {
        RuleSet::standard(&NoiseVocabulary::builtin()).unwrap()
    }

    #[test]
    fn standard_order() {
        assert_eq!(
            standard().rule_names(),
            vec![
                "lowercase",
                "strip_bracketed",
                "strip_digits",
                "remove_noise_words",
                "retain_letters",
                "collapse_whitespace",
            ]
        );
    }

    #[test]
    fn empty_vocabulary_skips_noise_rule() {
        let rules = RuleSet::standard(&NoiseVocabulary::new("none", Vec::new())).unwrap();
        assert_eq!(rules.len(), 5);
        assert!(!rules.rule_names().contains(&"remove_noise_words"));
    }

    #[test]
    fn bracketed_spans_are_non_greedy() {
        let rule = NormalizationRule::StripBracketed;
        assert_eq!(rule.apply("a (b) c (d) e"), "a  c  e");
        assert_eq!(rule.apply("x [1] {2} y"), "x   y");
        assert_eq!(rule.apply("open (only"), "open (only");
    }

    #[test]
    fn digits_are_removed() {
        assert_eq!(NormalizationRule::StripDigits.apply("b12 500"), "b ");
    }

    #[test]
    fn retain_letters_drops_symbols() {
        assert_eq!(NormalizationRule::RetainLetters.apply("co-amoxiclav/x"), "coamoxiclavx");
    }

    #[test]
    fn collapse_whitespace_trims() {
        assert_eq!(
            NormalizationRule::CollapseWhitespace.apply("  a \t b\n c  "),
            "a b c"
        );
    }

    #[test]
    fn noise_words_leave_partial_matches() {
        let rules = standard();
        assert_eq!(rules.apply("tabletx tablet"), "tabletx");
        assert_eq!(rules.apply("Captopril Cap"), "captopril");
    }

    #[test]
    fn units_split_by_punctuation_are_removed() {
        assert_eq!(standard().apply("Amoxicillin 250mg/5ml Susp"), "amoxicillin");
    }

    #[test]
    fn remove_and_insert_rules() {
        let rules = standard()
            .remove_rule("strip_digits")
            .insert_rule(0, NormalizationRule::CollapseWhitespace);
        let names = rules.rule_names();
        assert_eq!(names[0], "collapse_whitespace");
        assert!(!names.contains(&"strip_digits"));
    }

    #[test]
    fn trace_records_each_step() {
        let steps = standard().trace("Paracetamol (500mg) Tablet", 1);
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0].rule, "lowercase");
        assert_eq!(steps[0].output, "paracetamol (500mg) tablet");
        assert_eq!(steps[1].output, "paracetamol  tablet");
        assert_eq!(steps[5].output, "paracetamol");
    }
}
