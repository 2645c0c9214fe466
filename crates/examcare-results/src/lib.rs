//! Result messages for Big Bang Exam Care result sheets.
//!
//! Given a [`Dataset`] of student rows, a formatting pass:
//! 1. coerces the category's mark columns to numbers,
//! 2. derives `Total` where the category sums marks,
//! 3. computes the highest marks and a competition-ranked `Position`,
//! 4. writes a `Result` message per row (a marks line, or an "Absent" line for blank/zero marks).
//!
//! Passes never fail as a whole. Column-level problems and rows that could not be rendered are
//! reported in the returned [`FormatReport`].

#![forbid(unsafe_code)]

mod category;
mod config;
mod formatter;
mod report;
mod template;

pub use crate::category::{CategoryParseError, ExamCategory};
pub use crate::config::{
    CategoryConfig, RankBasis, ResultOptions, DEFAULT_FOOTER, DEFAULT_HEADER, POSITION_COLUMN,
    RESULT_COLUMN, TOTAL_COLUMN,
};
pub use crate::formatter::{
    format_medical_results, format_results, format_ssc_hsc_results, format_varsity_results,
    ResultFormatter,
};
pub use crate::report::{FormatIssue, FormatReport, RowOutcome};
pub use crate::template::{RenderError, Template, TemplateError};

pub use examcare_table::{CoerceError, CoercionPolicy, Dataset, RankError, Row, Value};
