#![allow(dead_code)]

use examcare_results::{Dataset, Value};

pub const EXAM: &str = "Weekly Test 1";
pub const FOOTER: &str = "— Big Bang Exam Care";

/// A sheet with `Exam`, `Name` and `Roll` columns followed by `mark_columns`.
///
/// Each row is `(name, roll, marks)`; every row sits the same exam.
pub fn sheet(mark_columns: &[&str], rows: Vec<(&str, i64, Vec<Value>)>) -> Dataset {
    let mut columns = vec!["Exam", "Name", "Roll"];
    columns.extend_from_slice(mark_columns);

    let mut sheet = Dataset::new(columns);
    for (name, roll, marks) in rows {
        let mut row = vec![Value::from(EXAM), Value::from(name), Value::from(roll)];
        row.extend(marks);
        sheet.push_row(row).unwrap();
    }
    sheet
}

/// Wrap a body line in the standard header and footer.
pub fn message(body: &str) -> String {
    format!("ফলাফল: {EXAM}\n{body}\n{FOOTER}")
}

pub fn column(sheet: &Dataset, name: &str) -> Vec<Value> {
    sheet.column(name).unwrap().into_iter().cloned().collect()
}

pub fn results(sheet: &Dataset) -> Vec<String> {
    sheet
        .column("Result")
        .unwrap()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}
