//! Library-level pipeline: compare, project, render

use crate::common::TestFixture;
use keydiff::classify::Classification;
use keydiff::render::{Highlight, LayoutOptions};
use keydiff::report::ReportOptions;
use keydiff::source::{DuckDbSource, TabularSource};
use keydiff::{
    compare, project, render_side_by_side, render_text, Dataset, ReportCounts, SourceLabels, Value,
};

fn dataset(columns: &[&str], rows: Vec<Vec<Value>>) -> Dataset {
    Dataset::new(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
}

fn key(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_deleted_inserted_scenario() {
    let a = dataset(
        &["id", "v"],
        vec![vec![Value::Integer(1), "a".into()], vec![Value::Integer(2), "b".into()]],
    );
    let b = dataset(
        &["id", "v"],
        vec![vec![Value::Integer(2), "b".into()], vec![Value::Integer(3), "c".into()]],
    );
    let result = compare(&a, &b, Some(&key(&["id"]))).unwrap();
    let sets = project(&result);

    assert_eq!(sets.deleted.rows(), &[vec![Value::Integer(1), Value::from("a")]]);
    assert_eq!(sets.inserted.rows(), &[vec![Value::Integer(3), Value::from("c")]]);
    assert!(sets.updated.is_empty());
    assert_eq!(result.counts().same, 1);
}

#[test]
fn test_updated_scenario_report_line() {
    let a = dataset(&["id", "v"], vec![vec![Value::Integer(1), "a".into()]]);
    let b = dataset(&["id", "v"], vec![vec![Value::Integer(1), "b".into()]]);
    let result = compare(&a, &b, Some(&key(&["id"]))).unwrap();
    let sets = project(&result);

    let record = &sets.updated.records()[0];
    assert_eq!(record["id"], &Value::Integer(1));
    assert_eq!(record["v_before"], &Value::from("a"));
    assert_eq!(record["v_after"], &Value::from("b"));

    let text = render_text(
        &sets,
        result.key(),
        &ReportCounts::from(&result),
        &SourceLabels::default(),
        &ReportOptions::default(),
    );
    assert!(text.contains("v: a → b"));
}

#[test]
fn test_every_row_lands_in_exactly_one_category() {
    let fixture = TestFixture::new().unwrap();
    let a_path = fixture.create_large_csv("a.csv", 400, 0).unwrap();
    let b_path = fixture.create_large_csv("b.csv", 450, 9).unwrap();

    let source = DuckDbSource::new().unwrap();
    let a = source.load(&a_path).unwrap();
    let b = source.load(&b_path).unwrap();
    let result = compare(&a, &b, Some(&key(&["id"]))).unwrap();
    let counts = result.counts();

    assert_eq!(counts.same + counts.updated + counts.deleted, a.row_count());
    assert_eq!(counts.same + counts.updated + counts.inserted, b.row_count());
    assert_eq!(counts.deleted, 0);
    assert_eq!(counts.inserted, 50);
    // ids divisible by 9 below 400
    assert_eq!(counts.updated, 45);
}

#[test]
fn test_shuffled_inputs_give_same_change_sets() {
    let rows_a: Vec<Vec<Value>> = (0..60)
        .map(|i| vec![Value::Integer(i), Value::from(format!("v{}", i))])
        .collect();
    let rows_b: Vec<Vec<Value>> = (10..70)
        .map(|i| {
            let v = if i % 4 == 0 { format!("w{}", i) } else { format!("v{}", i) };
            vec![Value::Integer(i), Value::from(v)]
        })
        .collect();

    let a = dataset(&["id", "v"], rows_a.clone());
    let b = dataset(&["id", "v"], rows_b.clone());

    // deterministic shuffles
    let mut shuffled_a = rows_a;
    shuffled_a.reverse();
    let mut shuffled_b = rows_b;
    shuffled_b.rotate_left(17);

    let original = compare(&a, &b, Some(&key(&["id"]))).unwrap();
    let shuffled = compare(
        &dataset(&["id", "v"], shuffled_a),
        &dataset(&["id", "v"], shuffled_b),
        Some(&key(&["id"])),
    )
    .unwrap();

    assert_eq!(original.counts(), shuffled.counts());
    assert_eq!(project(&original), project(&shuffled));
}

#[test]
fn test_side_by_side_groups_categories() {
    let a = dataset(
        &["id", "v"],
        vec![
            vec![Value::Integer(4), "gone".into()],
            vec![Value::Integer(1), "same".into()],
            vec![Value::Integer(2), "old".into()],
        ],
    );
    let b = dataset(
        &["id", "v"],
        vec![
            vec![Value::Integer(3), "new".into()],
            vec![Value::Integer(2), "changed".into()],
            vec![Value::Integer(1), "same".into()],
        ],
    );
    let result = compare(&a, &b, Some(&key(&["id"]))).unwrap();
    let view = render_side_by_side(
        &result,
        &SourceLabels::new(Some("a.csv".into()), Some("b.csv".into())),
        &LayoutOptions::default(),
    );

    assert_eq!(
        view.grid.row_classes,
        vec![
            Classification::Same,
            Classification::Updated,
            Classification::Deleted,
            Classification::Inserted,
        ]
    );
    let rows = view.grid.data_rows();
    // status column sits between the blocks
    assert_eq!(rows[1][2].value, Value::from("UPDATED"));
    assert_eq!(rows[1][0].highlight, Highlight::Changed);
    assert_eq!(rows[2][0].highlight, Highlight::Removed);
    assert_eq!(rows[2][3].value, Value::Null);
    assert_eq!(rows[3][3].highlight, Highlight::Added);
    assert_eq!(view.summary.counts.total(), 4);
    assert_eq!(view.summary.reference_label, "a.csv");
}
