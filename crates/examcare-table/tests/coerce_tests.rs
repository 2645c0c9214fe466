use examcare_table::{coerce_column, sum_columns, CoerceError, CoercionPolicy, Dataset, Value};
use pretty_assertions::assert_eq;

fn marks(values: Vec<Value>) -> Dataset {
    let mut sheet = Dataset::new(vec!["MCQ", "CQ"]);
    for (i, mcq) in values.into_iter().enumerate() {
        sheet.push_row(vec![mcq, Value::from(i as i64 * 10)]).unwrap();
    }
    sheet
}

fn column(sheet: &Dataset, name: &str) -> Vec<Value> {
    sheet.column(name).unwrap().into_iter().cloned().collect()
}

#[test]
fn zero_fill_turns_non_numeric_cells_into_zero() {
    let mut sheet = marks(vec!["40".into(), "x".into(), Value::Blank, 12.5.into()]);
    coerce_column(&mut sheet, "MCQ", CoercionPolicy::ZeroFill).unwrap();
    assert_eq!(
        column(&sheet, "MCQ"),
        vec![Value::from(40), Value::from(0), Value::from(0), Value::from(12.5)]
    );
}

#[test]
fn blank_policy_leaves_non_numeric_cells_blank() {
    let mut sheet = marks(vec!["40".into(), "absent".into(), true.into()]);
    coerce_column(&mut sheet, "MCQ", CoercionPolicy::Blank).unwrap();
    assert_eq!(column(&sheet, "MCQ"), vec![40.into(), Value::Blank, 1.into()]);
}

#[test]
fn error_cell_fails_the_whole_column_untouched() {
    let original = vec!["40".into(), Value::Error("#N/A".to_string()), "x".into()];
    let mut sheet = marks(original.clone());

    let err = coerce_column(&mut sheet, "MCQ", CoercionPolicy::Lenient).unwrap_err();
    assert_eq!(
        err,
        CoerceError::ErrorCell {
            column: "MCQ".to_string(),
            row: 1,
            code: "#N/A".to_string(),
        }
    );
    assert_eq!(column(&sheet, "MCQ"), original);
}

#[test]
fn missing_column_is_reported() {
    let mut sheet = marks(vec![1.into()]);
    let err = coerce_column(&mut sheet, "Marks", CoercionPolicy::Blank).unwrap_err();
    assert_eq!(
        err,
        CoerceError::MissingColumn {
            column: "Marks".to_string()
        }
    );
}

#[test]
fn sum_columns_adds_row_wise() {
    let mut sheet = marks(vec![40.into(), "x".into(), 7.into()]);
    let columns = vec!["MCQ".to_string(), "CQ".to_string()];

    sum_columns(&mut sheet, &columns, "Total").unwrap();
    assert_eq!(
        column(&sheet, "Total"),
        vec![40.into(), Value::Blank, 27.into()]
    );

    coerce_column(&mut sheet, "MCQ", CoercionPolicy::ZeroFill).unwrap();
    sum_columns(&mut sheet, &columns, "Total").unwrap();
    assert_eq!(
        column(&sheet, "Total"),
        vec![Value::from(40), Value::from(10), Value::from(27)]
    );
}

#[test]
fn sum_columns_requires_every_addend() {
    let mut sheet = marks(vec![1.into()]);
    let err = sum_columns(&mut sheet, &["MCQ".to_string(), "Written".to_string()], "Total")
        .unwrap_err();
    assert_eq!(
        err,
        CoerceError::MissingColumn {
            column: "Written".to_string()
        }
    );
    assert!(!sheet.has_column("Total"));
}
