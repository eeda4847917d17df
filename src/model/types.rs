//! Typed extraction of resolved values

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::{Mapping, Value, ValueKind};

/// Kind of value a caller can request from a typed lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Text scalar
    Text,
    /// Integer, read from any numeric scalar
    Integer,
    /// Floating-point, read from any numeric scalar
    Float,
    /// Boolean scalar
    Boolean,
    /// Sequence node
    Sequence,
    /// Mapping node
    Mapping,
}

impl ValueType {
    /// Check whether a value of `kind` satisfies this type.
    ///
    /// Integer and float requests both accept any numeric kind.
    pub fn accepts(&self, kind: ValueKind) -> bool {
        match self {
            ValueType::Text => kind == ValueKind::Text,
            ValueType::Integer | ValueType::Float => kind.is_numeric(),
            ValueType::Boolean => kind == ValueKind::Boolean,
            ValueType::Sequence => kind == ValueKind::Sequence,
            ValueType::Mapping => kind == ValueKind::Mapping,
        }
    }

    /// Lowercase name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Sequence => "sequence",
            ValueType::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust types that can be extracted from a resolved [`Value`]
pub trait FromValue: Sized {
    /// Requested type, reported when extraction fails
    const TYPE: ValueType;

    /// Extract from `value`, or `None` if the kind does not match
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const TYPE: ValueType = ValueType::Text;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for i64 {
    const TYPE: ValueType = ValueType::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for f64 {
    const TYPE: ValueType = ValueType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for bool {
    const TYPE: ValueType = ValueType::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for Vec<Value> {
    const TYPE: ValueType = ValueType::Sequence;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_sequence().map(<[Value]>::to_vec)
    }
}

impl FromValue for Mapping {
    const TYPE: ValueType = ValueType::Mapping;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_mapping().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts() {
        assert!(ValueType::Integer.accepts(ValueKind::Float));
        assert!(ValueType::Float.accepts(ValueKind::Integer));
        assert!(!ValueType::Text.accepts(ValueKind::Integer));
        assert!(!ValueType::Boolean.accepts(ValueKind::Text));
        assert!(!ValueType::Mapping.accepts(ValueKind::Null));
    }

    #[test]
    fn test_no_coercion_to_text_or_boolean() {
        assert_eq!(String::from_value(&Value::Integer(1)), None);
        assert_eq!(String::from_value(&Value::Boolean(true)), None);
        assert_eq!(bool::from_value(&Value::from("true")), None);
        assert_eq!(i64::from_value(&Value::from("1")), None);
    }

    #[test]
    fn test_extract() {
        assert_eq!(String::from_value(&Value::from("x")), Some("x".to_string()));
        assert_eq!(i64::from_value(&Value::Float(2.7)), Some(2));
        assert_eq!(f64::from_value(&Value::Integer(2)), Some(2.0));
        assert_eq!(
            Vec::<Value>::from_value(&Value::Sequence(vec![Value::Null])),
            Some(vec![Value::Null])
        );
        assert!(Mapping::from_value(&Value::mapping()).is_some());
    }
}
