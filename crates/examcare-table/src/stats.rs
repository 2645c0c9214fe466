use crate::value::Value;

/// Largest numeric value in a column, ignoring cells without a numeric value.
pub fn column_max<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<f64> {
    values
        .into_iter()
        .filter_map(Value::to_number)
        .fold(None, |max, n| match max {
            Some(m) if m >= n => Some(m),
            _ => Some(n),
        })
}

/// The "highest marks" statistic: [`column_max`], or `0` when no row has a numeric value.
pub fn highest_or_zero<'a>(values: impl IntoIterator<Item = &'a Value>) -> f64 {
    column_max(values).unwrap_or(0.0)
}
