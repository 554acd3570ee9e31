//! Reconciliation options.

use serde::{Deserialize, Serialize};

use crate::columns;

/// Column bindings and literals used by the reconciler.
///
/// The defaults match the exports the tool was written against: a template
/// with `Generic Name` / `Prescribing Restrictions` and a facility sheet with
/// `DRUG (GENERIC NAME)` / `CATATAN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    /// Drug name column in the template.
    pub template_name_column: String,
    /// Restriction column in the template; receives the merged text.
    pub restriction_column: String,
    /// Drug name column as it appears in the facility source.
    pub facility_name_column: String,
    /// Note column as it appears in the facility source.
    pub facility_note_column: String,
    /// Name the facility drug name column is renamed to.
    pub canonical_name_column: String,
    /// Name the facility note column is renamed to.
    pub canonical_note_column: String,
    /// Separator between aggregated notes and between restriction and note.
    pub note_separator: String,
    /// Value that stands in for a missing restriction.
    pub missing_restriction: String,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            template_name_column: columns::GENERIC_NAME.to_string(),
            restriction_column: columns::PRESCRIBING_RESTRICTIONS.to_string(),
            facility_name_column: columns::FACILITY_GENERIC_NAME.to_string(),
            facility_note_column: columns::FACILITY_NOTE.to_string(),
            canonical_name_column: columns::GENERIC_NAME.to_string(),
            canonical_note_column: columns::NOTE.to_string(),
            note_separator: columns::NOTE_SEPARATOR.to_string(),
            missing_restriction: columns::MISSING_RESTRICTION.to_string(),
        }
    }
}

impl ReconcileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template_name_column(mut self, column: impl Into<String>) -> Self {
        self.template_name_column = column.into();
        self
    }

    pub fn with_restriction_column(mut self, column: impl Into<String>) -> Self {
        self.restriction_column = column.into();
        self
    }

    pub fn with_facility_name_column(mut self, column: impl Into<String>) -> Self {
        self.facility_name_column = column.into();
        self
    }

    pub fn with_facility_note_column(mut self, column: impl Into<String>) -> Self {
        self.facility_note_column = column.into();
        self
    }
}
