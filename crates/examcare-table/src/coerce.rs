use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::{Dataset, TableError};
use crate::value::Value;

/// What a non-numeric cell turns into when a mark column is coerced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Non-numeric cells become `0`, so every row takes part in totals and ranking.
    ZeroFill,
    /// Non-numeric cells become blank and drop out of ranking.
    #[default]
    Blank,
    /// Like [`CoercionPolicy::Blank`], but callers keep going when the column cannot be coerced
    /// at all and work with the original cells.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("missing column: {column}")]
    MissingColumn { column: String },

    #[error("cannot coerce {column} row {row}: error cell {code}")]
    ErrorCell {
        column: String,
        row: usize,
        code: String,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Coerce every cell of `column` to a number in place.
///
/// Coercion is all-or-nothing: a spreadsheet error cell anywhere in the column fails the whole
/// column and leaves it untouched.
pub fn coerce_column(
    dataset: &mut Dataset,
    column: &str,
    policy: CoercionPolicy,
) -> Result<(), CoerceError> {
    let idx = dataset
        .column_idx(column)
        .ok_or_else(|| CoerceError::MissingColumn {
            column: column.to_string(),
        })?;

    for (row_idx, row) in dataset.raw_rows().iter().enumerate() {
        if let Value::Error(code) = &row[idx] {
            return Err(CoerceError::ErrorCell {
                column: column.to_string(),
                row: row_idx,
                code: code.clone(),
            });
        }
    }

    let mut blanked = 0usize;
    for row in dataset.rows_mut() {
        let cell = &mut row[idx];
        *cell = match (cell.to_number(), policy) {
            (Some(n), _) => Value::Number(n),
            (None, CoercionPolicy::ZeroFill) => Value::Number(0.0),
            (None, CoercionPolicy::Blank | CoercionPolicy::Lenient) => {
                blanked += 1;
                Value::Blank
            }
        };
    }
    if blanked > 0 {
        log::debug!("coerced {column}: {blanked} non-numeric cell(s) left blank");
    }
    Ok(())
}

/// Write the row-wise sum of `columns` into `into`.
///
/// A row with any non-numeric addend gets a blank total.
pub fn sum_columns(dataset: &mut Dataset, columns: &[String], into: &str) -> Result<(), CoerceError> {
    let mut indices = Vec::with_capacity(columns.len());
    for column in columns {
        let idx = dataset
            .column_idx(column)
            .ok_or_else(|| CoerceError::MissingColumn {
                column: column.clone(),
            })?;
        indices.push(idx);
    }

    let totals: Vec<Value> = dataset
        .raw_rows()
        .iter()
        .map(|row| {
            indices
                .iter()
                .map(|&idx| row[idx].to_number())
                .sum::<Option<f64>>()
                .map(Value::Number)
                .unwrap_or(Value::Blank)
        })
        .collect();

    dataset.set_column(into, totals)?;
    Ok(())
}
