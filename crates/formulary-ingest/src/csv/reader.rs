//! CSV file reading into text-only DataFrames.

use std::path::Path;

use formulary_model::SourceRole;
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

/// Check that a source exists before handing it to the CSV reader.
fn check_source(path: &Path, role: SourceRole) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(IngestError::SourceNotFound {
            role,
            path: path.to_path_buf(),
        }),
        Err(e) => Err(IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Normalizes a header value: drops a UTF-8 BOM and surrounding whitespace.
fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Trim header names in place and reject blank ones.
fn normalize_headers(df: &mut DataFrame, path: &Path) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    for name in names {
        let cleaned = normalize_header(&name);
        if cleaned.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
        if cleaned != name {
            df.rename(&name, cleaned.into())?;
        }
    }
    Ok(())
}

/// Reads a formulary CSV into a DataFrame.
///
/// The first row is the header. Every column is read as text; empty cells
/// are null. A path that does not exist is reported as
/// [`IngestError::SourceNotFound`] carrying `role`.
pub fn read_formulary(path: &Path, role: SourceRole) -> Result<DataFrame> {
    check_source(path, role)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    normalize_headers(&mut df, path)?;

    tracing::debug!(
        role = %role,
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded formulary source"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::AnyValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff}Generic Name "), "Generic Name");
        assert_eq!(normalize_header("CATATAN"), "CATATAN");
    }

    #[test]
    fn test_read_keeps_text_verbatim() {
        let file = create_temp_csv("Generic Name,Code\nParacetamol,007\nAspirin,1.50\n");
        let df = read_formulary(file.path(), SourceRole::Template).unwrap();

        assert_eq!(df.height(), 2);
        let code = df.column("Code").unwrap();
        assert_eq!(code.get(0).unwrap(), AnyValue::String("007"));
        assert_eq!(code.get(1).unwrap(), AnyValue::String("1.50"));
    }

    #[test]
    fn test_read_trims_headers() {
        let file = create_temp_csv(" Generic Name ,CATATAN\nParacetamol,OTC\n");
        let df = read_formulary(file.path(), SourceRole::Facility).unwrap();
        assert!(df.column("Generic Name").is_ok());
    }

    #[test]
    fn test_missing_source_names_role() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = read_formulary(&path, SourceRole::Facility).unwrap_err();
        assert!(matches!(
            err,
            IngestError::SourceNotFound {
                role: SourceRole::Facility,
                ..
            }
        ));
    }
}
