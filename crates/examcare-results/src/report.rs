use examcare_table::{CoerceError, RankError, TableError};
use thiserror::Error;

use crate::template::RenderError;

/// A column-level problem the formatter recovered from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatIssue {
    #[error("missing column {column}: no totals or positions derived")]
    MissingColumn { column: String },

    #[error("coercion failed, highest reset and positions cleared: {0}")]
    CoercionFailed(#[source] CoerceError),

    #[error("coercion failed, original values kept: {0}")]
    CoercionIgnored(#[source] CoerceError),

    #[error("ranking failed, positions cleared: {0}")]
    RankingFailed(#[source] RankError),

    #[error("could not write derived column: {0}")]
    Table(#[from] TableError),
}

/// What happened to one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Marks line rendered.
    Marks(String),
    /// The ranking value was blank or zero.
    Absent(String),
    /// The row's `Result` is left empty.
    Failed(RenderError),
}

impl RowOutcome {
    /// The text stored in the `Result` column for this row.
    pub fn text(&self) -> &str {
        match self {
            RowOutcome::Marks(text) | RowOutcome::Absent(text) => text,
            RowOutcome::Failed(_) => "",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RowOutcome::Absent(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RowOutcome::Failed(_))
    }
}

/// Everything a formatting pass derived, next to the mutated dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatReport {
    /// Name of the [`crate::CategoryConfig`] that was applied.
    pub category: String,
    /// Highest value of the ranking column (`0` when none, or after a strict failure).
    pub highest: f64,
    pub outcomes: Vec<RowOutcome>,
    pub issues: Vec<FormatIssue>,
}

impl FormatReport {
    pub fn results(&self) -> impl Iterator<Item = &str> + '_ {
        self.outcomes.iter().map(RowOutcome::text)
    }

    pub fn absent_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_absent()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Whether anything was recovered from, at column or row level.
    pub fn is_degraded(&self) -> bool {
        !self.issues.is_empty() || self.failed_count() > 0
    }
}
