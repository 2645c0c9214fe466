//! In-memory result sheets for Big Bang Exam Care.
//!
//! This crate holds the tabular substrate the result formatter works on:
//! - [`Dataset`]: ordered, named columns of loosely-typed [`Value`]s.
//! - Column coercion to numbers ([`coerce_column`]) and derived sums ([`sum_columns`]).
//! - The "highest marks" statistic ([`highest_or_zero`]) and competition ranking
//!   ([`rank_descending_min`]).
//! - Row-range selection in the `20`, `20-50`, `20-` syntax ([`RowSelection`]).

#![forbid(unsafe_code)]

mod coerce;
mod dataset;
mod rank;
mod selection;
mod stats;
mod value;

pub use crate::coerce::{coerce_column, sum_columns, CoerceError, CoercionPolicy};
pub use crate::dataset::{Dataset, Row, TableError, TableResult};
pub use crate::rank::{rank_descending_min, RankError};
pub use crate::selection::{RowSelection, SelectionError};
pub use crate::stats::{column_max, highest_or_zero};
pub use crate::value::{format_general, parse_number, Value};
