use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar stored at a leaf of the serialization tree.
///
/// Variant order matters for untagged deserialization: integral JSON numbers
/// land in [`SerializerValue::Int`], everything else numeric in
/// [`SerializerValue::Double`]. JSON `null` is kept as [`SerializerValue::Null`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerializerValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
}

impl SerializerValue {
    /// Reads the value as a real number, accepting integers and numeric strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Double(value) => Some(*value),
            Self::String(text) => text.trim().parse().ok(),
            Self::Null | Self::Bool(_) => None,
        }
    }

    /// Reads the value as an integer, accepting integral doubles and numeric strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Double(value)
                if value.is_finite()
                    && value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value < i64::MAX as f64 =>
            {
                Some(*value as i64)
            }
            Self::Double(_) => None,
            Self::String(text) => text.trim().parse().ok(),
            Self::Null | Self::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::String(text) => match text.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for SerializerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Double(value) => write!(f, "{value}"),
            Self::String(text) => f.write_str(text),
        }
    }
}

impl From<bool> for SerializerValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SerializerValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for SerializerValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for SerializerValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for SerializerValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for SerializerValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_reads_are_permissive() {
        assert_eq!(SerializerValue::Int(8).as_f64(), Some(8.0));
        assert_eq!(SerializerValue::Double(3.0).as_i64(), Some(3));
        assert_eq!(SerializerValue::Double(3.5).as_i64(), None);
        assert_eq!(SerializerValue::from(" 2.5 ").as_f64(), Some(2.5));
        assert_eq!(SerializerValue::Bool(true).as_f64(), None);
        assert_eq!(SerializerValue::Null.as_f64(), None);
        assert_eq!(SerializerValue::Null.as_i64(), None);
    }

    #[test]
    fn display_matches_editor_text() {
        assert_eq!(SerializerValue::Double(100.0).to_string(), "100");
        assert_eq!(SerializerValue::Double(2.5).to_string(), "2.5");
        assert_eq!(SerializerValue::Int(-4).to_string(), "-4");
    }
}
