//! Literal value types for compiled subscription conditions
//!
//! The `Value` enum carries the coerced scalar attached to a leaf condition.
//! Subscription literals are limited to strings, numbers, and booleans; a
//! bare `null` never survives compilation (it is rewritten into an
//! exists/not_exists operator by the parser).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coerced literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// String value (quotes already stripped)
    String(String),
    /// Number value (f64, handles both int and float literals)
    Number(f64),
    /// Boolean value
    Bool(bool),
}

impl Value {
    /// Returns the string content if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
