//! Document loaders
//!
//! The cache never reads files itself. It hands the fully qualified key to a
//! [`DocumentLoader`], which turns it into a value tree by whatever means the
//! embedding application chooses.

use std::collections::HashMap;

use anyhow::{Context, anyhow};

use crate::model::Value;

/// Produces the value tree for a fully qualified document key
pub trait DocumentLoader: Send + Sync {
    /// Load the document stored under `key`
    fn load(&self, key: &str) -> anyhow::Result<Value>;
}

impl<F> DocumentLoader for F
where
    F: Fn(&str) -> anyhow::Result<Value> + Send + Sync,
{
    fn load(&self, key: &str) -> anyhow::Result<Value> {
        self(key)
    }
}

/// Loader backed by an in-memory table of keys to values
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: HashMap<String, Value>,
}

impl MemoryLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value tree under `key`
    pub fn with_document(mut self, key: impl Into<String>, root: Value) -> Self {
        self.documents.insert(key.into(), root);
        self
    }

    /// Register a YAML text under `key`
    pub fn with_yaml(self, key: impl Into<String>, text: &str) -> anyhow::Result<Self> {
        let key = key.into();
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(text).with_context(|| format!("parsing YAML for '{key}'"))?;
        Ok(self.with_document(key, Value::from(yaml)))
    }

    /// Register a JSON text under `key`
    pub fn with_json(self, key: impl Into<String>, text: &str) -> anyhow::Result<Self> {
        let key = key.into();
        let json: serde_json::Value =
            serde_json::from_str(text).with_context(|| format!("parsing JSON for '{key}'"))?;
        Ok(self.with_document(key, Value::from(json)))
    }

    /// Check if a key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }
}

impl DocumentLoader for MemoryLoader {
    fn load(&self, key: &str) -> anyhow::Result<Value> {
        self.documents
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow!("Missing {key}"))
    }
}
