use examcare_table::{
    coerce_column, highest_or_zero, rank_descending_min, sum_columns, CoercionPolicy, Dataset,
    Row, Value,
};

use crate::category::ExamCategory;
use crate::config::{CategoryConfig, RankBasis, ResultOptions, POSITION_COLUMN, RESULT_COLUMN};
use crate::report::{FormatIssue, FormatReport, RowOutcome};

/// Applies one [`CategoryConfig`] to result sheets.
#[derive(Clone, Debug)]
pub struct ResultFormatter {
    config: CategoryConfig,
    options: ResultOptions,
}

struct Derived {
    highest: f64,
    positions: Vec<Value>,
}

impl ResultFormatter {
    pub fn new(config: CategoryConfig) -> Self {
        Self::with_options(config, ResultOptions::default())
    }

    pub fn with_options(config: CategoryConfig, options: ResultOptions) -> Self {
        Self { config, options }
    }

    pub fn config(&self) -> &CategoryConfig {
        &self.config
    }

    pub fn options(&self) -> &ResultOptions {
        &self.options
    }

    /// Derive `Position` (and `Total` for summed categories) and write one `Result` message per
    /// row.
    ///
    /// Never fails: problems are recorded in the returned report, columns that cannot be
    /// derived are left blank, and rows that cannot be rendered get an empty `Result`.
    pub fn format(&self, dataset: &mut Dataset) -> FormatReport {
        log::debug!(
            "formatting {} row(s) as {}",
            dataset.row_count(),
            self.config.name
        );

        let mut issues = Vec::new();
        let derived = self.derive(dataset, &mut issues);
        if let Err(err) = dataset.set_column(POSITION_COLUMN, derived.positions) {
            log::warn!("{}: {err}", self.config.name);
            issues.push(FormatIssue::Table(err));
        }

        let outcomes: Vec<RowOutcome> = dataset
            .rows()
            .map(|row| self.render_row(row, derived.highest))
            .collect();
        let results = outcomes
            .iter()
            .map(|outcome| Value::Text(outcome.text().to_string()))
            .collect();
        if let Err(err) = dataset.set_column(RESULT_COLUMN, results) {
            log::warn!("{}: {err}", self.config.name);
            issues.push(FormatIssue::Table(err));
        }

        FormatReport {
            category: self.config.name.clone(),
            highest: derived.highest,
            outcomes,
            issues,
        }
    }

    fn derive(&self, dataset: &mut Dataset, issues: &mut Vec<FormatIssue>) -> Derived {
        let row_count = dataset.row_count();
        let cleared = |highest: f64| Derived {
            highest,
            positions: vec![Value::Blank; row_count],
        };
        let lenient = self.config.coercion == CoercionPolicy::Lenient;

        if let Some(missing) = self
            .config
            .required_columns()
            .find(|column| !dataset.has_column(column))
        {
            log::warn!("{}: missing column {missing}", self.config.name);
            issues.push(FormatIssue::MissingColumn {
                column: missing.to_string(),
            });
            return cleared(0.0);
        }

        for input in &self.config.inputs {
            if let Err(err) = coerce_column(dataset, input, self.config.coercion) {
                if lenient {
                    log::debug!("{}: keeping original {input}: {err}", self.config.name);
                    issues.push(FormatIssue::CoercionIgnored(err));
                } else {
                    log::warn!("{}: {err}", self.config.name);
                    issues.push(FormatIssue::CoercionFailed(err));
                    return cleared(0.0);
                }
            }
        }

        if let RankBasis::Sum { columns, into } = &self.config.basis {
            if let Err(err) = sum_columns(dataset, columns, into) {
                log::warn!("{}: {err}", self.config.name);
                issues.push(FormatIssue::CoercionFailed(err));
                return cleared(0.0);
            }
        }

        let basis = self.config.basis.column();
        let Some(values) = dataset.column(basis) else {
            log::warn!("{}: missing column {basis}", self.config.name);
            issues.push(FormatIssue::MissingColumn {
                column: basis.to_string(),
            });
            return cleared(0.0);
        };

        let highest = highest_or_zero(values.iter().copied());
        match rank_descending_min(values) {
            Ok(ranks) => {
                log::debug!("{}: highest {highest}", self.config.name);
                Derived {
                    highest,
                    positions: ranks.into_iter().map(Value::from).collect(),
                }
            }
            Err(err) => {
                log::warn!("{}: {err}", self.config.name);
                issues.push(FormatIssue::RankingFailed(err));
                cleared(if lenient { highest } else { 0.0 })
            }
        }
    }

    fn render_row(&self, row: Row<'_>, highest: f64) -> RowOutcome {
        let basis = self.config.basis.column();
        let (absent, body) = match row.get_or_blank(basis) {
            Value::Error(_) => (false, &self.config.marks),
            value => match value.to_number() {
                Some(n) if n != 0.0 => (false, &self.config.marks),
                _ => (true, &self.config.absent),
            },
        };

        let rendered = self.options.header.render(row, highest).and_then(|header| {
            let body = body.render(row, highest)?;
            Ok(format!("{header}\n{body}\n{}", self.options.footer))
        });
        match rendered {
            Ok(text) if absent => RowOutcome::Absent(text),
            Ok(text) => RowOutcome::Marks(text),
            Err(err) => {
                log::warn!("{}: row {}: {err}", self.config.name, row.index());
                RowOutcome::Failed(err)
            }
        }
    }
}

/// Format an SSC/HSC sheet. Sheets with a `CQ` column rank on `MCQ + CQ`, others on `MCQ`.
pub fn format_ssc_hsc_results(dataset: &mut Dataset) -> FormatReport {
    format_results(ExamCategory::SscHsc, dataset)
}

/// Format a varsity/engineering admission sheet, ranked on `Total`.
pub fn format_varsity_results(dataset: &mut Dataset) -> FormatReport {
    format_results(ExamCategory::Varsity, dataset)
}

/// Format a medical admission sheet, ranked on `Marks`.
pub fn format_medical_results(dataset: &mut Dataset) -> FormatReport {
    format_results(ExamCategory::Medical, dataset)
}

pub fn format_results(category: ExamCategory, dataset: &mut Dataset) -> FormatReport {
    ResultFormatter::new(category.config_for(dataset)).format(dataset)
}
