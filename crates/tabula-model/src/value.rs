use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

/// Raw value of one field for one record, before formatting.
///
/// Serialized untagged so the Interactive payload carries plain JSON scalars/arrays (the raw
/// half of a `[display, raw]` pair).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    /// Ordered two-slot value used by two-line fields and links (`display`, `target`).
    Pair(Box<Value>, Box<Value>),
    /// Variable-length sequence used by N-line fields.
    List(Vec<Value>),
}

impl Value {
    pub fn pair(first: impl Into<Value>, second: impl Into<Value>) -> Value {
        Value::Pair(Box::new(first.into()), Box::new(second.into()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null or an empty string. Blank values are skipped by the count aggregate.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Lenient integer coercion: unparseable or mismatched values become `0`.
    pub fn as_i64(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Float(f) if f.is_finite() => f.trunc() as i64,
            Value::Bool(b) => i64::from(*b),
            Value::Text(s) => parse_i64(s),
            _ => 0,
        }
    }

    /// Lenient float coercion: unparseable, non-finite or mismatched values become `0.0`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int(n) => *n as f64,
            Value::Float(f) if f.is_finite() => *f,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Text(s) => parse_f64(s),
            _ => 0.0,
        }
    }

    /// Lenient text coercion. Pairs and lists yield their first element.
    pub fn as_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            Value::Pair(first, _) => first.as_text(),
            Value::List(items) => items.first().map(Value::as_text).unwrap_or_default(),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            _ => false,
        }
    }

    pub fn as_pair(&self) -> Option<(&Value, &Value)> {
        match self {
            Value::Pair(first, second) => Some((first, second)),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

fn parse_i64(s: &str) -> i64 {
    let s = s.trim();
    s.parse::<i64>().unwrap_or_else(|_| {
        let f = parse_f64(s);
        f.trunc() as i64
    })
}

fn parse_f64(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_numbers_fall_back_through_float_parsing() {
        assert_eq!(parse_i64(" 42 "), 42);
        assert_eq!(parse_i64("42.9"), 42);
        assert_eq!(parse_i64("-3.5"), -3);
        assert_eq!(parse_i64("bad"), 0);
        assert_eq!(parse_f64("inf"), 0.0);
        assert_eq!(parse_f64("NaN"), 0.0);
    }
}
