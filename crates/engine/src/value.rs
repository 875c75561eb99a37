use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// What a column's cells hold.
///
/// Drives coercion at the clipboard boundary: pasted text is always a
/// string; Number columns parse it before storing and comparing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
}

/// A scalar cell value.
///
/// Untagged serde representation: a grid round-trips through JSON as plain
/// scalars ("x", 5.0, null). Variant order matters for deserialization -
/// numbers must be tried before text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Null,
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    /// Coerce input text by the target column's kind.
    ///
    /// Number columns parse before storing; unparseable input falls back
    /// to text rather than being rejected. Empty input is Null.
    pub fn coerce(input: &str, kind: ColumnKind) -> Value {
        if input.is_empty() {
            return Value::Null;
        }
        match kind {
            ColumnKind::Number => match input.trim().parse::<f64>() {
                Ok(n) => Value::Number(n),
                Err(_) => Value::Text(input.to_string()),
            },
            ColumnKind::Text => Value::Text(input.to_string()),
        }
    }

    /// Canonical display string: integers without a decimal point, no
    /// scientific notation, -0 normalized to 0.
    pub fn to_display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) => s.clone(),
            Value::Number(n) => format_number(*n),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type-aware equality for diffing.
    ///
    /// Numeric arms compare numerically, so "5" equals 5.0 and a re-paste
    /// of "5.0" over 5.0 is not a change. Null equals Null and the empty
    /// string. NaN equals NaN (total order), keeping diffs deterministic.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, Value::Text(s)) | (Value::Text(s), Value::Null) => s.is_empty(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Value::Number(n), Value::Text(s)) | (Value::Text(s), Value::Number(n)) => {
                match s.trim().parse::<f64>() {
                    Ok(parsed) => OrderedFloat(parsed) == OrderedFloat(*n),
                    Err(_) => false,
                }
            }
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

fn format_number(n: f64) -> String {
    if !n.is_finite() {
        if n.is_nan() {
            return "NaN".to_string();
        }
        return if n > 0.0 { "INF".to_string() } else { "-INF".to_string() };
    }

    // Normalize -0.0 to 0.0
    let n = if n == 0.0 { 0.0 } else { n };

    // Integer fast path: no decimal point needed
    if n.fract() == 0.0 && n.abs() < 9e15 {
        format!("{:.0}", n)
    } else {
        // Fixed precision, trim trailing zeros, no scientific notation
        let mut s = format!("{:.15}", n);
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        s
    }
}
