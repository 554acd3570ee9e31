//! Facility rows after column renaming.

use formulary_ingest::column_text;
use formulary_model::{ReconcileOptions, SourceRole};
use polars::prelude::DataFrame;

use crate::error::{ReconcileError, Result};

/// One facility row: drug name plus its note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityEntry {
    pub generic_name: Option<String>,
    /// Never null; a missing note is `""`.
    pub note: String,
}

impl FacilityEntry {
    pub fn new(generic_name: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            generic_name: Some(generic_name.into()),
            note: note.into(),
        }
    }
}

/// Find the column a facility field lives in.
///
/// The export name (`DRUG (GENERIC NAME)`) wins; a sheet that already uses the
/// canonical name (`Generic Name`) is accepted as is.
fn resolve_column<'a>(df: &DataFrame, source: &'a str, canonical: &'a str) -> Result<&'a str> {
    if df.column(source).is_ok() {
        return Ok(source);
    }
    if df.column(canonical).is_ok() {
        return Ok(canonical);
    }
    Err(ReconcileError::MissingColumn {
        role: SourceRole::Facility,
        column: source.to_string(),
    })
}

/// Read the facility table as renamed entries, in row order.
pub fn facility_entries(df: &DataFrame, options: &ReconcileOptions) -> Result<Vec<FacilityEntry>> {
    let name_column = resolve_column(
        df,
        &options.facility_name_column,
        &options.canonical_name_column,
    )?;
    let note_column = resolve_column(
        df,
        &options.facility_note_column,
        &options.canonical_note_column,
    )?;
    tracing::debug!(
        name_column,
        note_column,
        "renamed facility columns"
    );

    let names = column_text(df, name_column)?;
    let notes = column_text(df, note_column)?;
    Ok(names
        .into_iter()
        .zip(notes)
        .map(|(generic_name, note)| FacilityEntry {
            generic_name,
            note: note.unwrap_or_default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn frame(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn reads_export_columns() {
        let df = frame(vec![
            ("DRUG (GENERIC NAME)", vec![Some("Paracetamol"), Some("Aspirin")]),
            ("CATATAN", vec![Some("OTC"), None]),
        ]);
        let entries = facility_entries(&df, &ReconcileOptions::default()).unwrap();
        assert_eq!(
            entries,
            vec![
                FacilityEntry::new("Paracetamol", "OTC"),
                FacilityEntry::new("Aspirin", ""),
            ]
        );
    }

    #[test]
    fn accepts_canonical_columns() {
        let df = frame(vec![
            ("Generic Name", vec![Some("Paracetamol")]),
            ("Catatan", vec![Some("OTC")]),
        ]);
        let entries = facility_entries(&df, &ReconcileOptions::default()).unwrap();
        assert_eq!(entries, vec![FacilityEntry::new("Paracetamol", "OTC")]);
    }

    #[test]
    fn missing_note_column_is_an_error() {
        let df = frame(vec![("DRUG (GENERIC NAME)", vec![Some("Paracetamol")])]);
        let err = facility_entries(&df, &ReconcileOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::MissingColumn {
                role: SourceRole::Facility,
                ref column,
            } if column == "CATATAN"
        ));
    }
}
