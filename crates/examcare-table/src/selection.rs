use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("row range is empty")]
    Empty,
    #[error("invalid start row number: {0:?}")]
    InvalidStart(String),
    #[error("invalid end row number: {0:?}")]
    InvalidEnd(String),
    #[error("row {row} is out of range (sheet has {len} rows)")]
    OutOfRange { row: usize, len: usize },
}

/// A 1-based pick of rows, written the way operators type it when choosing which results to
/// send: `20` (one row), `20-50` (inclusive range) or `20-` (row 20 to the end).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowSelection {
    #[default]
    All,
    Single(usize),
    Range { start: usize, end: usize },
    From(usize),
}

impl RowSelection {
    pub fn parse(input: &str) -> Result<Self, SelectionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::Empty);
        }

        let Some((start, end)) = trimmed.split_once('-') else {
            let row = parse_row_number(trimmed)
                .ok_or_else(|| SelectionError::InvalidStart(trimmed.to_string()))?;
            return Ok(RowSelection::Single(row));
        };

        let start = parse_row_number(start)
            .ok_or_else(|| SelectionError::InvalidStart(start.to_string()))?;
        let end = end.trim();
        if end.is_empty() {
            return Ok(RowSelection::From(start));
        }
        match end.parse::<usize>() {
            Ok(end) if end >= start => Ok(RowSelection::Range { start, end }),
            _ => Err(SelectionError::InvalidEnd(end.to_string())),
        }
    }

    /// 0-based row indices for a sheet of `len` rows.
    ///
    /// Ranges are clipped to the sheet, so a range starting past the end selects nothing; a
    /// single row must exist.
    pub fn resolve(&self, len: usize) -> Result<Vec<usize>, SelectionError> {
        match *self {
            RowSelection::All => Ok((0..len).collect()),
            RowSelection::Single(row) => {
                if row == 0 || row > len {
                    return Err(SelectionError::OutOfRange { row, len });
                }
                Ok(vec![row - 1])
            }
            RowSelection::Range { start, end } => {
                Ok((start.saturating_sub(1)..end.min(len)).collect())
            }
            RowSelection::From(start) => Ok((start.saturating_sub(1)..len).collect()),
        }
    }
}

impl FromStr for RowSelection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RowSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSelection::All => f.write_str("all"),
            RowSelection::Single(row) => write!(f, "{row}"),
            RowSelection::Range { start, end } => write!(f, "{start}-{end}"),
            RowSelection::From(start) => write!(f, "{start}-"),
        }
    }
}

fn parse_row_number(s: &str) -> Option<usize> {
    s.trim().parse::<usize>().ok().filter(|&row| row >= 1)
}
