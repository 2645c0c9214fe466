use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::selection::{RowSelection, SelectionError};
use crate::value::Value;

pub type TableResult<T> = Result<T, TableError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("schema mismatch: expected {expected} values, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("column length mismatch for {column}: expected {expected} values, got {actual}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("record {record}: field {field} is not a scalar")]
    InvalidRecord { record: usize, field: String },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

static BLANK: Value = Value::Blank;

/// An ordered sequence of rows sharing one column schema.
///
/// Columns keep their insertion order; derived columns (`Total`, `Position`, `Result`) are
/// appended by [`Dataset::set_column`] the first time they are written and replaced in place
/// afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create an empty dataset. If a column name repeats, lookups resolve to its first
    /// occurrence.
    pub fn new(columns: Vec<impl Into<String>>) -> Self {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut column_index = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            column_index.entry(column.clone()).or_insert(idx);
        }

        Self {
            columns,
            column_index,
            rows: Vec::new(),
        }
    }

    /// Build a dataset from JSON records (an array of objects, one per row).
    ///
    /// Columns appear in first-seen order across all records. Keys a record does not carry are
    /// [`Value::Blank`]. Nested arrays/objects are rejected.
    pub fn from_records(
        records: &[serde_json::Map<String, serde_json::Value>],
    ) -> TableResult<Self> {
        let mut columns: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for record in records {
            for key in record.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }

        let mut dataset = Dataset::new(columns);
        for (record_idx, record) in records.iter().enumerate() {
            let mut row = Vec::with_capacity(dataset.columns.len());
            for column in &dataset.columns {
                let value = match record.get(column) {
                    None => Value::Blank,
                    Some(json) => {
                        json_to_value(json).ok_or_else(|| TableError::InvalidRecord {
                            record: record_idx,
                            field: column.clone(),
                        })?
                    }
                };
                row.push(value);
            }
            dataset.rows.push(row);
        }
        Ok(dataset)
    }

    /// Inverse of [`Dataset::from_records`]; every record carries every column.
    pub fn to_records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(column, value)| (column.clone(), value.to_json()))
                    .collect()
            })
            .collect()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index.contains_key(column)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> TableResult<()> {
        if row.len() != self.columns.len() {
            return Err(TableError::SchemaMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    pub(crate) fn column_idx(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    pub(crate) fn raw_rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<Value>] {
        &mut self.rows
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_idx(column)?;
        self.rows.get(row)?.get(idx)
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.rows.len()).then_some(Row {
            dataset: self,
            index,
        })
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> + '_ {
        (0..self.rows.len()).map(move |index| Row {
            dataset: self,
            index,
        })
    }

    /// All values of `column`, in row order.
    pub fn column(&self, column: &str) -> Option<Vec<&Value>> {
        let idx = self.column_idx(column)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Write a whole column, appending it if it does not exist yet.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> TableResult<()> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnLengthMismatch {
                column: name,
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        match self.column_idx(&name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                let idx = self.columns.len();
                self.columns.push(name.clone());
                self.column_index.insert(name, idx);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Copy of the rows picked by `selection`, in selection order.
    pub fn select(&self, selection: &RowSelection) -> TableResult<Dataset> {
        let indices = selection.resolve(self.rows.len())?;
        Ok(Dataset {
            columns: self.columns.clone(),
            column_index: self.column_index.clone(),
            rows: indices.into_iter().map(|i| self.rows[i].clone()).collect(),
        })
    }
}

/// Borrowed view of one row of a [`Dataset`].
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.dataset.value(self.index, column)
    }

    /// A column the sheet does not have reads as blank.
    pub fn get_or_blank(&self, column: &str) -> &'a Value {
        self.get(column).unwrap_or(&BLANK)
    }
}

fn json_to_value(json: &serde_json::Value) -> Option<Value> {
    match json {
        serde_json::Value::Null => Some(Value::Blank),
        serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
        serde_json::Value::String(s) => Some(Value::Text(s.clone())),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
    }
}
