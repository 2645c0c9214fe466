use std::fmt;
use std::str::FromStr;

use examcare_table::Dataset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CategoryConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown exam category `{0}` (expected one of: ssc_hsc, varsity, medical)")]
pub struct CategoryParseError(pub String);

/// The exam families result sheets come in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamCategory {
    SscHsc,
    Varsity,
    Medical,
}

impl ExamCategory {
    pub const ALL: [ExamCategory; 3] = [
        ExamCategory::SscHsc,
        ExamCategory::Varsity,
        ExamCategory::Medical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExamCategory::SscHsc => "ssc_hsc",
            ExamCategory::Varsity => "varsity",
            ExamCategory::Medical => "medical",
        }
    }

    /// The configuration to apply to `dataset`. SSC/HSC picks its variant from the presence of
    /// a `CQ` column.
    pub fn config_for(self, dataset: &Dataset) -> CategoryConfig {
        match self {
            ExamCategory::SscHsc if dataset.has_column("CQ") => CategoryConfig::ssc_hsc_with_cq(),
            ExamCategory::SscHsc => CategoryConfig::ssc_hsc_mcq_only(),
            ExamCategory::Varsity => CategoryConfig::varsity(),
            ExamCategory::Medical => CategoryConfig::medical(),
        }
    }
}

impl FromStr for ExamCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ExamCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

impl fmt::Display for ExamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
