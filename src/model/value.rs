//! Value tree for loaded documents
//!
//! A document is a tree of mappings, sequences and scalars. The tree is
//! format independent: JSON and YAML inputs both convert into [`Value`].

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Mapping node: string keys to child values
pub type Mapping = IndexMap<String, Value>;

/// Node of a document tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent/null scalar
    Null,

    /// Boolean scalar
    Boolean(bool),

    /// Integer scalar (64-bit signed)
    Integer(i64),

    /// Floating-point scalar
    Float(f64),

    /// Text scalar
    String(String),

    /// Ordered, 0-indexed list of values
    Sequence(Vec<Value>),

    /// String-keyed mapping of values
    Mapping(Mapping),
}

/// Dynamic kind of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Null scalar
    Null,
    /// Boolean scalar
    Boolean,
    /// Integer scalar
    Integer,
    /// Floating-point scalar
    Float,
    /// Text scalar
    Text,
    /// Sequence node
    Sequence,
    /// Mapping node
    Mapping,
}

impl ValueKind {
    /// Lowercase name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        }
    }

    /// Check if the kind is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueKind::Integer | ValueKind::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Dynamic kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::Text,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Create an empty mapping
    pub fn mapping() -> Self {
        Value::Mapping(Mapping::new())
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the text of a text scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a numeric scalar as an integer, truncating floats toward zero
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) => Some(f.trunc() as i64),
            _ => None,
        }
    }

    /// Get a numeric scalar as a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get a boolean scalar
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the elements of a sequence
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get the entries of a mapping
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key of a mapping
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Sequence(_) | Value::Mapping(_) => match serde_json::to_string(self) {
                Ok(json) => f.write_str(&json),
                Err(_) => write!(f, "{self:?}"),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
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

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(yaml: serde_yaml::Value) -> Self {
        match yaml {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Boolean(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(map) => {
                let mut entries = Mapping::with_capacity(map.len());
                for (key, value) in map {
                    match yaml_key(&key) {
                        Some(key) => {
                            entries.insert(key, Value::from(value));
                        }
                        None => log::warn!("Skipping non-scalar mapping key {key:?}"),
                    }
                }
                Value::Mapping(entries)
            }
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

/// Scalar YAML keys are addressed by their textual form
fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(&tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({
            "name": "samuel",
            "age": 42,
            "ratio": 0.5,
            "active": true,
            "tags": ["a", null]
        }));

        assert_eq!(value.kind(), ValueKind::Mapping);
        assert_eq!(value.get("name").and_then(Value::as_str), Some("samuel"));
        assert_eq!(value.get("age"), Some(&Value::Integer(42)));
        assert_eq!(value.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(value.get("active").and_then(Value::as_bool), Some(true));
        assert_eq!(
            value.get("tags").and_then(Value::as_sequence),
            Some(&[Value::from("a"), Value::Null][..])
        );
    }

    #[test]
    fn test_from_yaml_keys() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes\nname: x\n").unwrap();
        let value = Value::from(yaml);
        assert_eq!(value.get("1").and_then(Value::as_str), Some("one"));
        assert_eq!(value.get("true").and_then(Value::as_str), Some("yes"));
        assert_eq!(value.get("name").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn test_numeric_widening() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(3.9).as_i64(), Some(3));
        assert_eq!(Value::Float(-3.9).as_i64(), Some(-3));
        assert_eq!(Value::from("3").as_i64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::Integer(587).to_string(), "587");
        assert_eq!(
            Value::Sequence(vec![Value::from("a"), Value::Integer(1)]).to_string(),
            r#"["a",1]"#
        );
    }
}
