//! Backend runtime options.

use std::fmt;

use serde_json::Value;

use crate::{DecodeError, TYPE_FIELD};

/// Value of a backend-reported option.
///
/// Wire form is an `optionValue*` object:
/// `{"@type": "optionValueInteger", "value": "12345"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionValue {
    /// `optionValueBoolean`.
    Boolean(bool),
    /// `optionValueInteger`. The backend sends 64-bit integers as decimal
    /// strings; plain JSON numbers are accepted too.
    Integer(i64),
    /// `optionValueString`.
    String(String),
    /// `optionValueEmpty`: the option is unset.
    Empty,
}

impl OptionValue {
    /// Decode an `optionValue*` object.
    pub fn from_wire(value: &Value) -> Result<Self, DecodeError> {
        const KIND: &str = "optionValue";

        let kind = value
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| DecodeError::malformed(KIND, "missing @type"))?;
        let inner = value.get("value");

        match kind {
            "optionValueBoolean" => inner
                .and_then(Value::as_bool)
                .map(Self::Boolean)
                .ok_or_else(|| DecodeError::malformed(kind, "expected boolean value")),
            "optionValueInteger" => inner
                .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
                .map(Self::Integer)
                .ok_or_else(|| DecodeError::malformed(kind, "expected integer value")),
            "optionValueString" => inner
                .and_then(Value::as_str)
                .map(|s| Self::String(s.to_owned()))
                .ok_or_else(|| DecodeError::malformed(kind, "expected string value")),
            "optionValueEmpty" => Ok(Self::Empty),
            other => Err(DecodeError::malformed(other, "unknown option value type")),
        }
    }

    /// String payload, if this is a string option.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Integer payload, if this is an integer option.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Boolean payload, if this is a boolean option.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::Empty => f.write_str("<empty>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integer_accepts_string_and_number() {
        let from_string =
            OptionValue::from_wire(&json!({"@type": "optionValueInteger", "value": "9000000000"}))
                .unwrap();
        let from_number =
            OptionValue::from_wire(&json!({"@type": "optionValueInteger", "value": 12})).unwrap();

        assert_eq!(from_string, OptionValue::Integer(9_000_000_000));
        assert_eq!(from_number, OptionValue::Integer(12));
    }

    #[test]
    fn each_variant_decodes() {
        assert_eq!(
            OptionValue::from_wire(&json!({"@type": "optionValueBoolean", "value": true})).unwrap(),
            OptionValue::Boolean(true)
        );
        assert_eq!(
            OptionValue::from_wire(&json!({"@type": "optionValueString", "value": "1.6.0"}))
                .unwrap(),
            OptionValue::String("1.6.0".into())
        );
        assert_eq!(
            OptionValue::from_wire(&json!({"@type": "optionValueEmpty"})).unwrap(),
            OptionValue::Empty
        );
    }

    #[test]
    fn mismatched_payload_is_malformed() {
        let err = OptionValue::from_wire(&json!({"@type": "optionValueBoolean", "value": "yes"}))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));

        let err = OptionValue::from_wire(&json!({"value": 1})).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }
}
