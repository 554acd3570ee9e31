//! Atomic CSV output.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::error::{IngestError, Result};

fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension("csv.tmp")
}

/// Write a DataFrame as CSV with a header row.
///
/// Uses atomic write (temp file + rename), so the target either keeps its
/// previous contents or holds the complete new table.
pub fn write_formulary(df: &mut DataFrame, path: &Path) -> Result<()> {
    let temp_path = temp_path_for(path);

    // Create parent directory if needed
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IngestError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let file = File::create(&temp_path).map_err(|e| IngestError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    if let Err(error) = write_and_commit(df, file, &temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    tracing::info!(path = %path.display(), rows = df.height(), "wrote formulary");
    Ok(())
}

/// Fill the temp file, sync it and move it over the target.
fn write_and_commit(
    df: &mut DataFrame,
    mut file: File,
    temp_path: &Path,
    path: &Path,
) -> Result<()> {
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    file.sync_all().map_err(|e| IngestError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })?;
    drop(file);

    fs::rename(temp_path, path).map_err(|e| IngestError::AtomicWriteFailed {
        temp_path: temp_path.to_path_buf(),
        target_path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_sits_next_to_target() {
        assert_eq!(
            temp_path_for(Path::new("out/fpkdkl.csv")),
            PathBuf::from("out/fpkdkl.csv.tmp")
        );
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        use polars::prelude::{IntoColumn, NamedFrom, Series};

        let dir = tempfile::tempdir().expect("temp dir");
        // A non-empty directory in the target's place makes the rename fail.
        let target = dir.path().join("fpkdkl.csv");
        fs::create_dir(&target).expect("create dir");
        fs::write(target.join("keep.txt"), "x").expect("write file");
        let mut df = DataFrame::new(vec![
            Series::new("Generic Name".into(), vec!["Aspirin"]).into_column(),
        ])
        .expect("frame");

        let err = write_formulary(&mut df, &target).unwrap_err();

        assert!(matches!(err, IngestError::AtomicWriteFailed { .. }));
        assert!(!temp_path_for(&target).exists());
        assert!(target.join("keep.txt").exists());
    }
}
