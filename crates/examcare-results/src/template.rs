//! Result-line templates.
//!
//! A template is literal text with placeholders:
//! - `{Column}` reads the named column of the row being rendered (missing columns render empty),
//! - `{@highest}` is the sheet's highest-marks statistic,
//! - `{{` and `}}` are literal braces.

use std::fmt;
use std::fmt::Write as _;

use examcare_table::{format_general, Row, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const HIGHEST: &str = "highest";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unclosed placeholder starting at byte {offset}")]
    Unclosed { offset: usize },
    #[error("unmatched `}}` at byte {offset}")]
    Unopened { offset: usize },
    #[error("empty placeholder at byte {offset}")]
    EmptyPlaceholder { offset: usize },
    #[error("unknown statistic `@{0}`")]
    UnknownStatistic(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("column {column} holds error cell {code}")]
    ErrorCell { column: String, code: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Column(String),
    Highest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::Unopened { offset }),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, ch) in chars.by_ref() {
                        if ch == '}' {
                            closed = true;
                            break;
                        }
                        name.push(ch);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed { offset });
                    }
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(TemplateError::EmptyPlaceholder { offset });
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    match name.strip_prefix('@') {
                        Some(HIGHEST) => segments.push(Segment::Highest),
                        Some(other) => return Err(TemplateError::UnknownStatistic(other.to_string())),
                        None => segments.push(Segment::Column(name.to_string())),
                    }
                }
                _ => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Parse a template shipped with the crate. Built-in sources are covered by tests; should one
    /// ever fail to parse it renders verbatim instead of taking the formatter down.
    pub(crate) fn builtin(source: &str) -> Self {
        Self::parse(source).unwrap_or_else(|err| {
            log::warn!("built-in template {source:?} failed to parse: {err}");
            Self {
                source: source.to_string(),
                segments: vec![Segment::Literal(source.to_string())],
            }
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Columns referenced by `{Column}` placeholders, in order of appearance.
    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Column(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn render(&self, row: Row<'_>, highest: f64) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.source.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Highest => out.push_str(&format_general(highest)),
                Segment::Column(column) => match row.get_or_blank(column) {
                    Value::Error(code) => {
                        return Err(RenderError::ErrorCell {
                            column: column.clone(),
                            code: code.clone(),
                        })
                    }
                    value => {
                        let _ = write!(out, "{value}");
                    }
                },
            }
        }
        Ok(out)
    }
}

impl TryFrom<String> for Template {
    type Error = TemplateError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Template::parse(&source)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_literals_and_placeholders() {
        let template = Template::parse("Roll: {Roll}, Highest: {@highest}").unwrap();
        assert_eq!(
            template.segments,
            vec![
                Segment::Literal("Roll: ".to_string()),
                Segment::Column("Roll".to_string()),
                Segment::Literal(", Highest: ".to_string()),
                Segment::Highest,
            ]
        );
    }

    #[test]
    fn escaped_braces_are_literal() {
        let template = Template::parse("{{x}} {Name}").unwrap();
        assert_eq!(template.segments[0], Segment::Literal("{x} ".to_string()));
        assert_eq!(template.columns().collect::<Vec<_>>(), vec!["Name"]);
    }
}
