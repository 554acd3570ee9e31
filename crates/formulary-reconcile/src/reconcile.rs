//! Template / facility reconciliation.
//!
//! # Stages
//!
//! 1. Rename facility columns and read entries ([`facility_entries`])
//! 2. Key and group facility notes ([`AggregatedNotes`])
//! 3. Key template rows, keep the first row per key, inner-join on key
//! 4. Merge each surviving restriction with its note ([`merge_restriction`])
//!
//! Helper data (keys, raw notes) never enters a DataFrame, so the merged
//! frame has exactly the template's columns.

use std::collections::BTreeSet;

use formulary_ingest::column_text;
use formulary_model::{ReconcileOptions, SourceRole};
use formulary_normalize::Normalizer;
use polars::prelude::{BooleanChunked, DataFrame, NamedFrom, NewChunkedArray, Series};
use tracing::{debug, info, info_span, trace};

use crate::error::{ReconcileError, Result};
use crate::facility::facility_entries;
use crate::merge::merge_restriction;
use crate::notes::AggregatedNotes;

/// Row and key counts collected during one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub template_rows: usize,
    pub facility_rows: usize,
    pub template_empty_keys: usize,
    pub facility_empty_keys: usize,
    /// Template rows dropped because an earlier row had the same key.
    pub template_duplicates: usize,
    /// Distinct template keys with no facility row.
    pub template_only_keys: usize,
    /// Distinct facility keys with no template row.
    pub facility_only_keys: usize,
    pub matched: usize,
    /// Matched rows whose restriction picked up a facility note.
    pub annotated: usize,
}

/// Output of [`reconcile`].
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Template columns, one row per matched key, template order.
    pub merged: DataFrame,
    pub stats: ReconcileStats,
}

impl Reconciliation {
    /// Number of rows in the merged formulary.
    pub fn matched(&self) -> usize {
        self.merged.height()
    }
}

/// Outcome of keying one template row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowFate {
    EmptyKey,
    Duplicate,
    TemplateOnly,
    Matched,
}

fn require_column(df: &DataFrame, column: &str, role: SourceRole) -> Result<()> {
    if df.column(column).is_err() {
        return Err(ReconcileError::MissingColumn {
            role,
            column: column.to_string(),
        });
    }
    Ok(())
}

/// Decide each template row's fate: first occurrence of a non-empty key that
/// the facility also has is kept, everything else is dropped.
fn template_fates(keys: &[String], notes: &AggregatedNotes) -> Vec<RowFate> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    keys.iter()
        .map(|key| {
            if key.is_empty() {
                RowFate::EmptyKey
            } else if !seen.insert(key.as_str()) {
                RowFate::Duplicate
            } else if notes.contains_key(key) {
                RowFate::Matched
            } else {
                trace!(key = %key, "template key has no facility match");
                RowFate::TemplateOnly
            }
        })
        .collect()
}

/// Reconcile a template formulary against a facility formulary.
///
/// The template must contain the name and restriction columns named in
/// `options`; the facility must contain a name and a note column (export or
/// canonical spelling). Keys present on one side only are dropped without
/// error and show up in [`ReconcileStats`].
pub fn reconcile(
    template: &DataFrame,
    facility: &DataFrame,
    normalizer: &Normalizer,
    options: &ReconcileOptions,
) -> Result<Reconciliation> {
    let span = info_span!(
        "reconcile",
        vocabulary = normalizer.vocabulary_version()
    );
    let _enter = span.enter();

    require_column(template, &options.template_name_column, SourceRole::Template)?;
    require_column(template, &options.restriction_column, SourceRole::Template)?;

    let entries = facility_entries(facility, options)?;
    let notes = AggregatedNotes::from_entries(&entries, normalizer, &options.note_separator);
    debug!(
        rows = entries.len(),
        keys = notes.key_count(),
        empty_keys = notes.empty_key_rows(),
        "aggregated facility notes"
    );

    let keys: Vec<String> = column_text(template, &options.template_name_column)?
        .iter()
        .map(|name| normalizer.normalize_value(name.as_deref()))
        .collect();
    let fates = template_fates(&keys, &notes);

    let keep: Vec<bool> = fates.iter().map(|fate| *fate == RowFate::Matched).collect();
    let mask = BooleanChunked::from_slice("matched".into(), &keep);
    let mut merged = template.filter(&mask)?;

    let matched_keys: Vec<&str> = keys
        .iter()
        .zip(&fates)
        .filter(|(_, fate)| **fate == RowFate::Matched)
        .map(|(key, _)| key.as_str())
        .collect();
    let restrictions = column_text(&merged, &options.restriction_column)?;

    let mut annotated = 0usize;
    let mut merged_restrictions = Vec::with_capacity(matched_keys.len());
    for (key, restriction) in matched_keys.iter().zip(&restrictions) {
        let note = notes.get(key).unwrap_or_default();
        if !note.is_empty() {
            annotated += 1;
        }
        merged_restrictions.push(merge_restriction(restriction.as_deref(), &note, options));
    }
    merged.with_column(Series::new(
        options.restriction_column.as_str().into(),
        merged_restrictions,
    ))?;

    let count = |wanted: RowFate| fates.iter().filter(|fate| **fate == wanted).count();
    let matched = merged.height();
    let stats = ReconcileStats {
        template_rows: template.height(),
        facility_rows: entries.len(),
        template_empty_keys: count(RowFate::EmptyKey),
        facility_empty_keys: notes.empty_key_rows(),
        template_duplicates: count(RowFate::Duplicate),
        template_only_keys: count(RowFate::TemplateOnly),
        facility_only_keys: notes.key_count() - matched,
        matched,
        annotated,
    };

    debug!(
        template_only = stats.template_only_keys,
        facility_only = stats.facility_only_keys,
        duplicates = stats.template_duplicates,
        "dropped unmatched keys"
    );
    info!(
        matched = stats.matched,
        annotated = stats.annotated,
        "reconciled formulary"
    );

    Ok(Reconciliation { merged, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::FacilityEntry;

    #[test]
    fn fates_keep_first_matching_occurrence() {
        let notes = AggregatedNotes::from_entries(
            &[FacilityEntry::new("Aspirin", "")],
            Normalizer::builtin(),
            "; ",
        );
        let keys: Vec<String> = ["aspirin", "", "aspirin", "warfarin"]
            .iter()
            .map(|key| (*key).to_string())
            .collect();
        assert_eq!(
            template_fates(&keys, &notes),
            vec![
                RowFate::Matched,
                RowFate::EmptyKey,
                RowFate::Duplicate,
                RowFate::TemplateOnly,
            ]
        );
    }

    #[test]
    fn duplicate_of_unmatched_key_stays_dropped() {
        let notes = AggregatedNotes::default();
        let keys = vec!["warfarin".to_string(), "warfarin".to_string()];
        assert_eq!(
            template_fates(&keys, &notes),
            vec![RowFate::TemplateOnly, RowFate::Duplicate]
        );
    }
}
