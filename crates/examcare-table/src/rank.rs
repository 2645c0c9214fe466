use ordered_float::OrderedFloat;
use thiserror::Error;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("cannot rank row {row}: expected a number or blank, found {found}")]
    NonNumeric { row: usize, found: &'static str },
}

/// Competition ("min") ranking in descending order.
///
/// The largest value gets rank 1 and tied values share the lowest rank of their group, so
/// `[50, 50, 30]` ranks as `[1, 1, 3]`. A value's rank is one more than the number of values
/// strictly greater than it. Zero takes part like any other number; blank cells (and non-finite
/// numbers) get no rank. Any other cell means the column was never coerced and fails the
/// ranking as a whole.
pub fn rank_descending_min<'a>(
    values: impl IntoIterator<Item = &'a Value>,
) -> Result<Vec<Option<i64>>, RankError> {
    let mut keys = Vec::new();
    for (row, value) in values.into_iter().enumerate() {
        let key = match value {
            Value::Number(n) if n.is_finite() => Some(OrderedFloat(*n)),
            Value::Number(_) | Value::Blank => None,
            other => {
                return Err(RankError::NonNumeric {
                    row,
                    found: other.type_name(),
                })
            }
        };
        keys.push(key);
    }

    let mut sorted: Vec<OrderedFloat<f64>> = keys.iter().flatten().copied().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    Ok(keys
        .into_iter()
        .map(|key| {
            key.map(|k| {
                let greater = sorted.partition_point(|v| *v > k);
                greater as i64 + 1
            })
        })
        .collect())
}
