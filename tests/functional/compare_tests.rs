//! End-to-end compare runs over delimited inputs

use crate::common::{assertions, sample_data, CliTestRunner};
use keydiff::commands::{run_compare, CompareRequest};
use keydiff::config::CompareConfig;
use keydiff::KeydiffError;

#[test]
fn test_compare_writes_change_sets() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("reference.csv", &sample_data::reference_csv_data()).unwrap();
    let b = runner.fixture().create_csv("updated.csv", &sample_data::updated_csv_data()).unwrap();

    runner.compare(&a, &b, "out", &["--key", "id"]).unwrap();

    let out = runner.fixture().outdir("out");
    let (header, rows) = assertions::read_csv_lines(&out.join("diff_deleted.csv"));
    assert_eq!(header, "id,name,price");
    assert_eq!(rows, vec!["3,Cherry,2"]);

    let (header, rows) = assertions::read_csv_lines(&out.join("diff_inserted.csv"));
    assert_eq!(header, "id,name,price");
    assert_eq!(rows, vec!["4,Date,3"]);

    let (header, rows) = assertions::read_csv_lines(&out.join("diff_updated.csv"));
    assert_eq!(header, "id,name_before,name_after,price_before,price_after");
    assert_eq!(rows, vec!["1,Apple,Apple,1.5,1.6"]);
}

#[test]
fn test_combined_change_set_in_key_order() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("reference.csv", &sample_data::reference_csv_data()).unwrap();
    let b = runner.fixture().create_csv("updated.csv", &sample_data::updated_csv_data()).unwrap();

    runner.compare(&a, &b, "out", &["--key", "id"]).unwrap();

    let (header, rows) =
        assertions::read_csv_lines(&runner.fixture().outdir("out").join("diff_combined.csv"));
    assert_eq!(header, "id,name_before,name_after,price_before,price_after,status");
    assert_eq!(
        rows,
        vec![
            "1,Apple,Apple,1.5,1.6,UPDATED",
            "2,Banana,Banana,0.75,0.75,SAME",
            "3,Cherry,,2,,DELETED",
            "4,,Date,,3,INSERTED",
        ]
    );
}

#[test]
fn test_no_combined_flag_skips_combined_file() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("reference.csv", &sample_data::reference_csv_data()).unwrap();
    let b = runner.fixture().create_csv("updated.csv", &sample_data::updated_csv_data()).unwrap();

    runner
        .compare(&a, &b, "out", &["--key", "id", "--no-combined", "--prefix", "run"])
        .unwrap();

    let out = runner.fixture().outdir("out");
    assertions::assert_file_exists_and_not_empty(&out.join("run_deleted.csv"));
    assert!(!out.join("run_combined.csv").exists());
    assert!(!out.join("run_report.txt").exists());
}

#[test]
fn test_default_key_uses_all_columns() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("reference.csv", &sample_data::reference_csv_data()).unwrap();
    let b = runner.fixture().create_csv("updated.csv", &sample_data::updated_csv_data()).unwrap();

    let request = CompareRequest {
        a,
        b,
        name: "out".into(),
        config: CompareConfig {
            outputs: keydiff::config::OutputConfig {
                outdir: Some(runner.fixture().outdir("out")),
                ..Default::default()
            },
            ..Default::default()
        },
        quiet: true,
    };
    let outcome = run_compare(&request, None).unwrap();

    assert!(outcome.key_defaulted);
    assert_eq!(outcome.key, vec!["id", "name", "price"]);
    // A repriced row is a different full-row key
    assert_eq!(outcome.counts.same, 1);
    assert_eq!(outcome.counts.updated, 0);
    assert_eq!(outcome.counts.deleted, 2);
    assert_eq!(outcome.counts.inserted, 2);
}

#[test]
fn test_column_order_does_not_matter() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("reference.csv", &sample_data::reference_csv_data()).unwrap();
    let b = runner
        .fixture()
        .create_csv("reordered.csv", &sample_data::reordered_columns_csv_data())
        .unwrap();

    runner.compare(&a, &b, "out", &["--key", "id"]).unwrap();

    let out = runner.fixture().outdir("out");
    let (_, updated) = assertions::read_csv_lines(&out.join("diff_updated.csv"));
    assert_eq!(updated, vec!["1,Apple,Apple,1.5,1.6"]);
    let (header, inserted) = assertions::read_csv_lines(&out.join("diff_inserted.csv"));
    assert_eq!(header, "id,name,price");
    assert_eq!(inserted, vec!["4,Date,3"]);
}

#[test]
fn test_schema_mismatch_writes_nothing() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("reference.csv", &sample_data::reference_csv_data()).unwrap();
    let b = runner
        .fixture()
        .create_csv("changed.csv", &sample_data::schema_changed_csv_data())
        .unwrap();

    let err = runner.compare(&a, &b, "out", &["--key", "id"]).unwrap_err();
    match &err {
        KeydiffError::SchemaMismatch {
            only_in_a,
            only_in_b,
        } => {
            assert_eq!(only_in_a, &vec!["price".to_string()]);
            assert_eq!(only_in_b, &vec!["category".to_string()]);
        }
        other => panic!("expected schema mismatch, got {}", other),
    }
    assert!(!runner.fixture().outdir("out").exists());
}

#[test]
fn test_larger_dataset_becomes_reference() {
    let runner = CliTestRunner::new().unwrap();
    let small = runner
        .fixture()
        .create_csv("small.csv", &[vec!["id", "v"], vec!["1", "a"]])
        .unwrap();
    let large = runner
        .fixture()
        .create_csv("large.csv", &[vec!["id", "v"], vec!["1", "a"], vec!["2", "b"]])
        .unwrap();

    let mut config = CompareConfig::default();
    config.key = Some(vec!["id".into()]);
    config.outputs.outdir = Some(runner.fixture().outdir("out"));
    let request = CompareRequest {
        a: small.clone(),
        b: large.clone(),
        name: "out".into(),
        config: config.clone(),
        quiet: true,
    };
    let outcome = run_compare(&request, None).unwrap();
    assert!(outcome.swapped);
    assert_eq!(outcome.reference, "large.csv");
    assert_eq!(outcome.compare_to, "small.csv");
    assert_eq!(outcome.total_a, 2);
    assert_eq!(outcome.counts.deleted, 1);
    assert_eq!(outcome.counts.inserted, 0);

    config.reference = keydiff::config::ReferencePolicy::AsGiven;
    let request = CompareRequest {
        a: small,
        b: large,
        name: "out".into(),
        config,
        quiet: true,
    };
    let outcome = run_compare(&request, None).unwrap();
    assert!(!outcome.swapped);
    assert_eq!(outcome.counts.deleted, 0);
    assert_eq!(outcome.counts.inserted, 1);
}

#[test]
fn test_tab_separated_inputs() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv_raw("a.tsv", "id\tname\tqty\n1\tApple\t3\n2\tBanana\t5\n")
        .unwrap();
    let b = runner
        .fixture()
        .create_csv_raw("b.tsv", "id\tname\tqty\n1\tApple\t4\n2\tBanana\t5\n")
        .unwrap();

    runner.compare(&a, &b, "out", &["--key", "id"]).unwrap();
    let (_, updated) =
        assertions::read_csv_lines(&runner.fixture().outdir("out").join("diff_updated.csv"));
    assert_eq!(updated, vec!["1,Apple,Apple,3,4"]);
}

#[test]
fn test_check_command() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("reference.csv", &sample_data::reference_csv_data()).unwrap();
    let b = runner.fixture().create_csv("updated.csv", &sample_data::updated_csv_data()).unwrap();
    let changed = runner
        .fixture()
        .create_csv("changed.csv", &sample_data::schema_changed_csv_data())
        .unwrap();

    let a = a.to_string_lossy().into_owned();
    let b = b.to_string_lossy().into_owned();
    let changed = changed.to_string_lossy().into_owned();

    runner.expect_success(&["check", &a, &b, "--key", "id"]);
    let err = runner.expect_failure(&["check", &a, &changed]);
    assert!(err.is_validation());
    let err = runner.expect_failure(&["check", &a, &b, "--key", "sku"]);
    assert!(matches!(err, KeydiffError::KeyColumnNotFound { .. }));
}
