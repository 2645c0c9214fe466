use examcare_table::CoercionPolicy;
use serde::{Deserialize, Serialize};

use crate::template::Template;

pub const TOTAL_COLUMN: &str = "Total";
pub const POSITION_COLUMN: &str = "Position";
pub const RESULT_COLUMN: &str = "Result";

pub const DEFAULT_HEADER: &str = "ফলাফল: {Exam}";
pub const DEFAULT_FOOTER: &str = "— Big Bang Exam Care";

const SSC_CQ_ABSENT: &str = "Name: {Name}, Roll: {Roll}, Absent\nHighest Marks: {@highest}";
const SSC_CQ_MARKS: &str = "Name: {Name}, Roll: {Roll}, MCQ: {MCQ}, CQ: {CQ}, Total: {Total}, \
                            Position: {Position}, Highest Marks: {@highest}";
const SSC_MCQ_ABSENT: &str = "Name: {Name}, Roll: {Roll}, Absent\nHighest Marks (MCQ): {@highest}";
const SSC_MCQ_MARKS: &str = "Name: {Name}, Roll: {Roll}, Obtained Marks (MCQ): {MCQ}, \
                             Position: {Position}, Highest Marks (MCQ): {@highest}";
const VARSITY_ABSENT: &str = "Name: {Name}, Roll: {Roll}, Absent, Highest Marks: {@highest}";
const VARSITY_MARKS: &str = "Name: {Name}, Roll: {Roll}, MCQ: {MCQ}, Written: {Written}, \
                             Total: {Total}, Position: {Position}, Highest Marks: {@highest}.";
const MEDICAL_ABSENT: &str = "Name: {Name}, Roll: {Roll}, Absent, Highest Marks: {@highest} ";
const MEDICAL_MARKS: &str = "Name: {Name}, Roll: {Roll}, Obtained Marks: {Marks}, \
                             Position: {Position}, Highest Marks: {@highest} ";

/// The column a sheet is ranked on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBasis {
    /// Rank on an existing (coerced) column.
    Column(String),
    /// Rank on the row-wise sum of `columns`, written to `into` first.
    Sum { columns: Vec<String>, into: String },
}

impl RankBasis {
    pub fn column(&self) -> &str {
        match self {
            RankBasis::Column(column) => column,
            RankBasis::Sum { into, .. } => into,
        }
    }
}

/// How one exam category turns raw marks into a result message.
///
/// Built-in categories are available as constructors; custom ones can be deserialized (templates
/// are plain strings, see [`Template`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    /// Raw mark columns coerced to numbers before ranking.
    pub inputs: Vec<String>,
    pub coercion: CoercionPolicy,
    pub basis: RankBasis,
    /// Body used when the ranking value is blank or zero.
    pub absent: Template,
    /// Body used otherwise.
    pub marks: Template,
}

impl CategoryConfig {
    /// SSC/HSC sheets with a `CQ` column: MCQ + CQ into `Total`, missing marks count as 0.
    pub fn ssc_hsc_with_cq() -> Self {
        let inputs = vec!["MCQ".to_string(), "CQ".to_string()];
        Self {
            name: "ssc_hsc".to_string(),
            basis: RankBasis::Sum {
                columns: inputs.clone(),
                into: TOTAL_COLUMN.to_string(),
            },
            inputs,
            coercion: CoercionPolicy::ZeroFill,
            absent: Template::builtin(SSC_CQ_ABSENT),
            marks: Template::builtin(SSC_CQ_MARKS),
        }
    }

    /// SSC/HSC sheets with only an `MCQ` column.
    pub fn ssc_hsc_mcq_only() -> Self {
        Self {
            name: "ssc_hsc_mcq".to_string(),
            inputs: vec!["MCQ".to_string()],
            coercion: CoercionPolicy::ZeroFill,
            basis: RankBasis::Column("MCQ".to_string()),
            absent: Template::builtin(SSC_MCQ_ABSENT),
            marks: Template::builtin(SSC_MCQ_MARKS),
        }
    }

    /// Varsity/engineering admission: ranked on the sheet's own `Total`.
    pub fn varsity() -> Self {
        Self {
            name: "varsity".to_string(),
            inputs: vec![TOTAL_COLUMN.to_string()],
            coercion: CoercionPolicy::Blank,
            basis: RankBasis::Column(TOTAL_COLUMN.to_string()),
            absent: Template::builtin(VARSITY_ABSENT),
            marks: Template::builtin(VARSITY_MARKS),
        }
    }

    /// Medical admission: ranked on `Marks`; a column that cannot be coerced is used as-is.
    pub fn medical() -> Self {
        Self {
            name: "medical".to_string(),
            inputs: vec!["Marks".to_string()],
            coercion: CoercionPolicy::Lenient,
            basis: RankBasis::Column("Marks".to_string()),
            absent: Template::builtin(MEDICAL_ABSENT),
            marks: Template::builtin(MEDICAL_MARKS),
        }
    }

    /// Columns that must exist before anything can be derived.
    pub fn required_columns(&self) -> impl Iterator<Item = &str> + '_ {
        let summed: &[String] = match &self.basis {
            RankBasis::Sum { columns, .. } => columns,
            RankBasis::Column(_) => &[],
        };
        self.inputs
            .iter()
            .chain(summed.iter().filter(|c| !self.inputs.contains(*c)))
            .map(String::as_str)
    }
}

/// Message framing shared by every category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOptions {
    /// First line of every message.
    pub header: Template,
    /// Last line of every message, appended verbatim.
    pub footer: String,
}

impl Default for ResultOptions {
    fn default() -> Self {
        Self {
            header: Template::builtin(DEFAULT_HEADER),
            footer: DEFAULT_FOOTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_templates_parse() {
        for source in [
            DEFAULT_HEADER,
            SSC_CQ_ABSENT,
            SSC_CQ_MARKS,
            SSC_MCQ_ABSENT,
            SSC_MCQ_MARKS,
            VARSITY_ABSENT,
            VARSITY_MARKS,
            MEDICAL_ABSENT,
            MEDICAL_MARKS,
        ] {
            assert!(Template::parse(source).is_ok(), "{source}");
        }
    }

    #[test]
    fn sum_basis_requires_each_addend_once() {
        let config = CategoryConfig::ssc_hsc_with_cq();
        assert_eq!(config.required_columns().collect::<Vec<_>>(), vec!["MCQ", "CQ"]);
    }
}
