//! Loaded documents
//!
//! A [`Document`] is an immutable mapping tree plus the identity it was
//! loaded under. Documents are never mutated after construction; path
//! queries only read them.

use std::borrow::Cow;

use super::value::{Mapping, Value};
use crate::engine::PathEngine;
use crate::error::{DocPathError, Result};

/// Immutable, loaded document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Logical name (file name without directory and extension)
    name: String,
    /// Fully qualified key the document was loaded under
    key: String,
    /// Root mapping
    root: Mapping,
}

impl Document {
    /// Create a document from a root value loaded under `key`.
    ///
    /// The root must be a mapping. A null root (an empty file) becomes an
    /// empty mapping.
    pub fn new(key: impl Into<String>, root: Value) -> Result<Self> {
        let key = key.into();
        let root = match root {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            other => {
                return Err(DocPathError::invalid_argument(format!(
                    "Document '{key}' must have a mapping at its root, found {}",
                    other.kind()
                )));
            }
        };

        Ok(Self {
            name: logical_name(&key).to_string(),
            key,
            root,
        })
    }

    /// Create an anonymous document from a root value
    pub fn from_value(root: Value) -> Result<Self> {
        Self::new("", root)
    }

    /// Parse a JSON text into an anonymous document
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| DocPathError::invalid_argument(format!("Invalid JSON document: {e}")))?;
        Self::from_value(Value::from(json))
    }

    /// Parse a YAML text into an anonymous document
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(text)
            .map_err(|e| DocPathError::invalid_argument(format!("Invalid YAML document: {e}")))?;
        Self::from_value(Value::from(yaml))
    }

    /// Logical name of the document
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key the document was loaded under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Root mapping
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Resolve a path with the default (throwing) engine
    pub fn get(&self, path: &str) -> Result<Cow<'_, Value>> {
        PathEngine::new().lookup(self, path)
    }
}

/// File name of `key` without directories and extension
fn logical_name(key: &str) -> &str {
    let file = key.rsplit('/').next().unwrap_or(key);
    match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    }
}
