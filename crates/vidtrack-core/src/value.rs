//! # Value Module
//!
//! The dynamic value read out of a video record by property path.
//!
//! Record attributes are strings, booleans or integers. Validators and
//! completion criteria receive a `Value` and decide on its shape themselves,
//! so a wrong shape is a normal input rather than an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A field value as seen by validators and completion criteria.
///
/// Serializes untagged, so `Null` becomes JSON `null` and the other
/// variants become plain JSON scalars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value (absent or explicitly empty).
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// String value.
    Text(String),
}

impl Value {
    /// Create a text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Borrow the string payload, if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean payload, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Check for `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for text that is empty or whitespace-only.
    #[must_use]
    pub fn is_blank_text(&self) -> bool {
        self.as_str().is_some_and(|s| s.trim().is_empty())
    }

    /// Name of the value's shape, used in violation messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Text(_) => "string",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_detection() {
        assert!(Value::text("").is_blank_text());
        assert!(Value::text(" \t ").is_blank_text());
        assert!(!Value::text("x").is_blank_text());
        assert!(!Value::Null.is_blank_text());
        assert!(!Value::Bool(false).is_blank_text());
    }

    #[test]
    fn serializes_as_plain_json_scalars() {
        let values = vec![
            Value::Null,
            Value::Bool(true),
            Value::Integer(7),
            Value::text("en"),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,true,7,"en"]"#);
    }

    #[test]
    fn deserializes_from_plain_json_scalars() {
        let values: Vec<Value> = serde_json::from_str(r#"[null,false,42,"x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(false),
                Value::Integer(42),
                Value::text("x")
            ]
        );
    }
}
