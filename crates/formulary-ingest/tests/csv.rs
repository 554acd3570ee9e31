use std::fs;

use formulary_ingest::{IngestError, column_text, read_formulary, write_formulary};
use formulary_model::SourceRole;

#[test]
fn empty_cells_read_as_missing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("template.csv");
    fs::write(
        &path,
        "Generic Name,Prescribing Restrictions\nParacetamol,\nAmoxicillin,Specialist only\n",
    )
    .expect("write file");

    let df = read_formulary(&path, SourceRole::Template).expect("read csv");
    let restrictions = column_text(&df, "Prescribing Restrictions").expect("column");

    assert_eq!(restrictions, vec![None, Some("Specialist only".to_string())]);
}

#[test]
fn written_table_reads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("in.csv");
    let output = dir.path().join("nested").join("out.csv");
    fs::write(&input, "Generic Name,Notes\n\"Co-trimoxazole, oral\",\"Say \"\"hi\"\"\"\n")
        .expect("write file");

    let mut df = read_formulary(&input, SourceRole::Template).expect("read csv");
    write_formulary(&mut df, &output).expect("write csv");

    assert!(!output.with_extension("csv.tmp").exists());
    let again = read_formulary(&output, SourceRole::Template).expect("read back");
    assert_eq!(
        column_text(&again, "Generic Name").unwrap(),
        vec![Some("Co-trimoxazole, oral".to_string())]
    );
    assert_eq!(
        column_text(&again, "Notes").unwrap(),
        vec![Some("Say \"hi\"".to_string())]
    );
}

#[test]
fn missing_template_is_distinct_from_parse_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_formulary(&dir.path().join("fukkm-template.csv"), SourceRole::Template)
        .expect_err("missing file");

    match err {
        IngestError::SourceNotFound { role, path } => {
            assert_eq!(role, SourceRole::Template);
            assert!(path.ends_with("fukkm-template.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
