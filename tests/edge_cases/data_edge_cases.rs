//! Edge case tests for data-related scenarios

use crate::common::{assertions, CliTestRunner};
use keydiff::KeydiffError;

#[test]
fn test_duplicate_keys_pair_every_combination() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv_raw("a.csv", "id,v\n1,x\n1,y\n")
        .unwrap();
    let b = runner
        .fixture()
        .create_csv_raw("b.csv", "id,v\n1,x\n1,z\n")
        .unwrap();

    runner.compare(&a, &b, "out", &["--key", "id"]).unwrap();

    let (_, combined) =
        assertions::read_csv_lines(&runner.fixture().outdir("out").join("diff_combined.csv"));
    // A-major pairing within the key group
    assert_eq!(
        combined,
        vec!["1,x,x,SAME", "1,x,z,UPDATED", "1,y,x,UPDATED", "1,y,z,UPDATED"]
    );
}

#[test]
fn test_null_key_values_match_each_other() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv_raw("a.csv", "id,region,v\n1,,a\n2,north,b\n")
        .unwrap();
    let b = runner
        .fixture()
        .create_csv_raw("b.csv", "id,region,v\n1,,a2\n2,north,b\n")
        .unwrap();

    runner.compare(&a, &b, "out", &["--key", "id,region"]).unwrap();

    let (header, updated) =
        assertions::read_csv_lines(&runner.fixture().outdir("out").join("diff_updated.csv"));
    assert_eq!(header, "id,region,v_before,v_after");
    assert_eq!(updated, vec!["1,,a,a2"]);
}

#[test]
fn test_whitespace_is_trimmed_by_default() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv_raw("a.csv", "id,name\n1,\"  Apple \"\n")
        .unwrap();
    let b = runner
        .fixture()
        .create_csv_raw("b.csv", "id,name\n1,Apple\n")
        .unwrap();

    runner.compare(&a, &b, "trimmed", &["--key", "id"]).unwrap();
    let (_, updated) =
        assertions::read_csv_lines(&runner.fixture().outdir("trimmed").join("diff_updated.csv"));
    assert!(updated.is_empty());

    runner
        .compare(&a, &b, "raw", &["--key", "id", "--no-trim"])
        .unwrap();
    let (_, updated) =
        assertions::read_csv_lines(&runner.fixture().outdir("raw").join("diff_updated.csv"));
    assert_eq!(updated, vec!["1,  Apple ,Apple"]);
}

#[test]
fn test_header_only_compare_to() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv_raw("a.csv", "id,v\n1,a\n2,b\n")
        .unwrap();
    let b = runner.fixture().create_csv_raw("b.csv", "id,v\n").unwrap();

    runner.compare(&a, &b, "out", &["--key", "id"]).unwrap();

    let out = runner.fixture().outdir("out");
    let (_, deleted) = assertions::read_csv_lines(&out.join("diff_deleted.csv"));
    assert_eq!(deleted.len(), 2);
    let (header, inserted) = assertions::read_csv_lines(&out.join("diff_inserted.csv"));
    assert_eq!(header, "id,v");
    assert!(inserted.is_empty());
}

#[test]
fn test_values_with_commas_and_quotes_survive() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv_raw("a.csv", "id,note\n1,\"a, b\"\n2,\"say \"\"hi\"\"\"\n")
        .unwrap();
    let b = runner
        .fixture()
        .create_csv_raw("b.csv", "id,note\n2,\"say \"\"hi\"\"\"\n")
        .unwrap();

    runner.compare(&a, &b, "out", &["--key", "id", "--as-given"]).unwrap();

    let (_, deleted) =
        assertions::read_csv_lines(&runner.fixture().outdir("out").join("diff_deleted.csv"));
    assert_eq!(deleted, vec!["1,\"a, b\""]);
}

#[test]
fn test_unknown_key_column() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv_raw("a.csv", "id,v\n1,a\n").unwrap();
    let b = runner.fixture().create_csv_raw("b.csv", "id,v\n1,b\n").unwrap();

    let err = runner.compare(&a, &b, "out", &["--key", "id,sku"]).unwrap_err();
    match err {
        KeydiffError::KeyColumnNotFound {
            missing_in_a,
            missing_in_b,
        } => {
            assert_eq!(missing_in_a, vec!["sku"]);
            assert_eq!(missing_in_b, vec!["sku"]);
        }
        other => panic!("expected missing key column, got {}", other),
    }
    assert!(!runner.fixture().outdir("out").exists());
}

#[test]
fn test_blank_key_argument() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv_raw("a.csv", "id,v\n1,a\n").unwrap();
    let b = runner.fixture().create_csv_raw("b.csv", "id,v\n1,b\n").unwrap();

    let err = runner.compare(&a, &b, "out", &["--key", " , "]).unwrap_err();
    assert!(matches!(err, KeydiffError::EmptyKey));
}

#[test]
fn test_identical_inputs_have_no_changes() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv_raw("a.csv", "id,v\n1,a\n2,b\n")
        .unwrap();
    let b = runner
        .fixture()
        .create_csv_raw("b.csv", "id,v\n2,b\n1,a\n")
        .unwrap();

    runner.compare(&a, &b, "out", &["--key", "id", "--report"]).unwrap();

    let out = runner.fixture().outdir("out");
    for name in ["diff_deleted.csv", "diff_inserted.csv", "diff_updated.csv"] {
        let (_, rows) = assertions::read_csv_lines(&out.join(name));
        assert!(rows.is_empty(), "{} should be empty", name);
    }
    let report = std::fs::read_to_string(out.join("diff_report.txt")).unwrap();
    assert!(report.contains("Identical Rows: 2"));
    assert!(!report.contains("DIFFERENT:"));
}
