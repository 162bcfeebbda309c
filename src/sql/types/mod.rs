use std::fmt::Display;

use serde::{Serialize, ser::SerializeMap};

use crate::error::{Error, Result};

/// Runtime value held in a row column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Resolves a literal lexeme to a typed value
    ///
    /// `'quoted'` becomes a string without its quotes, integral numbers become
    /// integers, other numbers floats and `true`/`false` booleans. Anything
    /// else is kept verbatim as a string.
    pub fn from_literal(lexeme: &str) -> Self {
        if lexeme.len() >= 2 && lexeme.starts_with('\'') && lexeme.ends_with('\'') {
            return Value::String(lexeme[1..lexeme.len() - 1].to_string());
        }
        if lexeme.eq_ignore_ascii_case("true") {
            return Value::Boolean(true);
        }
        if lexeme.eq_ignore_ascii_case("false") {
            return Value::Boolean(false);
        }
        if let Ok(i) = lexeme.parse::<i64>() {
            return Value::Integer(i);
        }
        match lexeme.parse::<f64>() {
            Ok(f) if f.is_finite() => Value::Float(f),
            _ => Value::String(lexeme.to_string()),
        }
    }

    /// Numeric view of the value, used by ordering comparisons
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.parse().ok(),
            Value::Boolean(_) => None,
        }
    }
}

/// Canonical text form
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

/// A row maps column names to values, in column order
///
/// The column set is fixed once the row exists: values can be replaced but
/// columns are never added or removed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a column
    pub fn get_value(&self, column: &str) -> Result<&Value> {
        self.get(column)
            .ok_or_else(|| Error::NotFound(format!("column {}", column)))
    }

    /// Replaces the value of an existing column
    pub fn set_value(&mut self, column: &str, value: Value) -> Result<()> {
        match self.columns.iter_mut().find(|(name, _)| name == column) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::UnknownColumn(column.to_string())),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Column names in row order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Builds a row from (column, value) pairs; a repeated column keeps its
/// first position and its last value
impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut columns: Vec<(String, Value)> = Vec::new();
        for (name, value) in iter {
            let name = name.into();
            let value = value.into();
            match columns.iter_mut().find(|(n, _)| *n == name) {
                Some((_, slot)) => *slot = value,
                None => columns.push((name, value)),
            }
        }
        Self { columns }
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
