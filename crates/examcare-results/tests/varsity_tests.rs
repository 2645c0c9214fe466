mod common;

use examcare_results::{format_varsity_results, CoerceError, FormatIssue, RowOutcome, Value};
use pretty_assertions::assert_eq;

use common::{column, message, results, sheet};

fn varsity_row(
    name: &str,
    roll: i64,
    mcq: i64,
    written: i64,
    total: Value,
) -> (&str, i64, Vec<Value>) {
    (name, roll, vec![mcq.into(), written.into(), total])
}

#[test]
fn tied_totals_share_a_position() {
    let mut sheet = sheet(
        &["MCQ", "Written", "Total"],
        vec![
            varsity_row("Rahim", 1, 30, 20, 50.into()),
            varsity_row("Karim", 2, 25, 25, 50.into()),
            varsity_row("Salma", 3, 10, 20, 30.into()),
        ],
    );

    let report = format_varsity_results(&mut sheet);

    assert_eq!(report.category, "varsity");
    assert_eq!(report.highest, 50.0);
    assert!(report.issues.is_empty());
    assert_eq!(
        column(&sheet, "Position"),
        vec![Value::from(1), Value::from(1), Value::from(3)]
    );
    assert_eq!(
        results(&sheet),
        vec![
            message("Name: Rahim, Roll: 1, MCQ: 30, Written: 20, Total: 50, Position: 1, Highest Marks: 50."),
            message("Name: Karim, Roll: 2, MCQ: 25, Written: 25, Total: 50, Position: 1, Highest Marks: 50."),
            message("Name: Salma, Roll: 3, MCQ: 10, Written: 20, Total: 30, Position: 3, Highest Marks: 50."),
        ]
    );
}

#[test]
fn non_numeric_total_is_unranked_and_absent() {
    let mut sheet = sheet(
        &["MCQ", "Written", "Total"],
        vec![
            varsity_row("Rahim", 1, 30, 25, "55.5".into()),
            varsity_row("Karim", 2, 0, 0, "absent".into()),
            varsity_row("Salma", 3, 0, 0, 0.into()),
        ],
    );

    let report = format_varsity_results(&mut sheet);

    assert_eq!(report.highest, 55.5);
    assert_eq!(
        column(&sheet, "Total"),
        vec![Value::from(55.5), Value::Blank, Value::from(0)]
    );
    assert_eq!(
        column(&sheet, "Position"),
        vec![Value::from(1), Value::Blank, Value::from(2)]
    );
    assert_eq!(report.absent_count(), 2);
    assert_eq!(
        results(&sheet)[1],
        message("Name: Karim, Roll: 2, Absent, Highest Marks: 55.5")
    );
    assert_eq!(
        results(&sheet)[2],
        message("Name: Salma, Roll: 3, Absent, Highest Marks: 55.5")
    );
}

#[test]
fn missing_total_column_clears_positions() {
    let mut sheet = sheet(
        &["MCQ", "Written"],
        vec![("Rahim", 1, vec![30.into(), 20.into()])],
    );

    let report = format_varsity_results(&mut sheet);

    assert_eq!(report.highest, 0.0);
    assert_eq!(
        report.issues,
        vec![FormatIssue::MissingColumn {
            column: "Total".to_string()
        }]
    );
    assert_eq!(column(&sheet, "Position"), vec![Value::Blank]);
    assert_eq!(
        results(&sheet),
        vec![message("Name: Rahim, Roll: 1, Absent, Highest Marks: 0")]
    );
}

#[test]
fn all_blank_totals_give_zero_highest() {
    let mut sheet = sheet(
        &["Total"],
        vec![("Rahim", 1, vec![Value::Blank]), ("Karim", 2, vec!["".into()])],
    );

    let report = format_varsity_results(&mut sheet);

    assert_eq!(report.highest, 0.0);
    assert!(report.issues.is_empty());
    assert_eq!(column(&sheet, "Position"), vec![Value::Blank, Value::Blank]);
    assert_eq!(report.absent_count(), 2);
}

#[test]
fn error_cell_in_total_fails_strictly() {
    let mut sheet = sheet(
        &["MCQ", "Written", "Total"],
        vec![
            varsity_row("Rahim", 1, 30, 20, 50.into()),
            varsity_row("Karim", 2, 20, 20, Value::Error("#N/A".to_string())),
        ],
    );

    let report = format_varsity_results(&mut sheet);

    assert_eq!(report.highest, 0.0);
    assert_eq!(
        report.issues,
        vec![FormatIssue::CoercionFailed(CoerceError::ErrorCell {
            column: "Total".to_string(),
            row: 1,
            code: "#N/A".to_string(),
        })]
    );
    assert_eq!(column(&sheet, "Position"), vec![Value::Blank, Value::Blank]);
    assert_eq!(
        results(&sheet)[0],
        message("Name: Rahim, Roll: 1, MCQ: 30, Written: 20, Total: 50, Position: , Highest Marks: 0.")
    );
    assert!(matches!(report.outcomes[1], RowOutcome::Failed(_)));
    assert_eq!(results(&sheet)[1], "");
}
