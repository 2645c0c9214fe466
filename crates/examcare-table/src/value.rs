use std::fmt;

/// A single cell of a result sheet.
///
/// Sheets arrive loosely typed: marks may be numbers, numeric text (`"45"`), free text
/// (`"absent"`), blanks, or spreadsheet error cells carried over from the import (`#N/A`).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Blank,
    /// Spreadsheet error cell, stored as its code (e.g. `#DIV/0!`).
    Error(String),
}

impl Value {
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Blank)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Numeric view of the cell.
    ///
    /// Text is trimmed and parsed as a plain decimal number; booleans count as 1/0. Blanks,
    /// unparsable text, error cells and non-finite numbers have no numeric value.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.is_finite().then_some(*n),
            Value::Text(s) => parse_number(s),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Blank | Value::Error(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Bool(_) => "bool",
            Value::Blank => "blank",
            Value::Error(_) => "error",
        }
    }

    /// JSON form used by [`crate::Dataset::to_records`].
    ///
    /// Integral numbers are written as JSON integers so positions and whole marks stay `1`, not
    /// `1.0`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9.0e15 {
                    serde_json::Value::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            Value::Text(s) | Value::Error(s) => serde_json::Value::String(s.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Blank => serde_json::Value::Null,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Blank)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_general(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Blank => Ok(()),
            Value::Error(code) => f.write_str(code),
        }
    }
}

/// Render a number the way a spreadsheet's "General" format does for result sheets: whole
/// numbers without a fractional part, everything else with the shortest round-tripping digits.
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return String::new();
    }
    value.to_string()
}

/// Parse numeric text such as `45`, ` 32.5 `, `-1`, `+7` or `1e2`.
///
/// Grouping separators and currency symbols are rejected; marks never carry them and accepting
/// them would turn roll-number-like text into marks.
pub fn parse_number(text: &str) -> Option<f64> {
    let (sign, body) = split_sign_and_body(text);
    if body.is_empty() {
        return None;
    }
    let normalized = normalize_number(body)?;
    let parsed: f64 = normalized.parse().ok()?;
    let value = parsed * sign;
    value.is_finite().then_some(value)
}

fn split_sign_and_body(s: &str) -> (f64, &str) {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix('-') {
        (-1.0, rest.trim_start())
    } else if let Some(rest) = s.strip_prefix('+') {
        (1.0, rest.trim_start())
    } else {
        (1.0, s)
    }
}

fn normalize_number(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut saw_digit = false;
    let mut saw_decimal = false;
    let mut saw_exp = false;

    for ch in s.chars() {
        if ch.is_ascii_digit() {
            saw_digit = true;
            out.push(ch);
            continue;
        }

        if !saw_exp && ch == '.' {
            if saw_decimal {
                return None;
            }
            saw_decimal = true;
            out.push('.');
            continue;
        }

        if !saw_exp && matches!(ch, 'e' | 'E') {
            if !saw_digit {
                return None;
            }
            saw_exp = true;
            out.push('e');
            continue;
        }

        // Exponent sign is only valid immediately after `e` / `E`.
        if matches!(ch, '+' | '-') && out.ends_with('e') {
            out.push(ch);
            continue;
        }

        return None;
    }

    if !saw_digit || out.ends_with('e') || out.ends_with("e+") || out.ends_with("e-") {
        return None;
    }
    Some(out)
}
