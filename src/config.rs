//! Aggregate configuration
//!
//! Embedding applications usually keep engine, tag and cache settings in one
//! file. [`Config`] groups them and hands out configured components.

use serde::{Deserialize, Serialize};

use crate::cache::{CacheConfig, DocumentCache, DocumentLoader};
use crate::engine::{EngineOptions, PathEngine};
use crate::error::{DocPathError, Result};
use crate::tags::{TagCompiler, TagOptions};

/// Settings for every component of the crate
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path engine options
    pub engine: EngineOptions,
    /// Tag compiler options
    pub tags: TagOptions,
    /// Document cache options
    pub cache: CacheConfig,
}

impl Config {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| DocPathError::invalid_argument(format!("Invalid configuration: {e}")))
    }

    /// Parse a configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text)
            .map_err(|e| DocPathError::invalid_argument(format!("Invalid configuration: {e}")))
    }

    /// Path engine with the configured options
    pub fn engine(&self) -> PathEngine {
        PathEngine::with_options(self.engine)
    }

    /// Tag compiler with the configured options
    pub fn tag_compiler(&self) -> TagCompiler {
        TagCompiler::with_options(self.tags)
    }

    /// Document cache with the configured options
    pub fn document_cache<L: DocumentLoader>(&self, loader: L) -> DocumentCache<L> {
        DocumentCache::with_config(self.cache.clone(), loader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryLoader;
    use crate::engine::EmptyPathPolicy;
    use crate::tags::EmptyTokenPolicy;

    #[test]
    fn test_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.engine().throw_on_missing());
        assert_eq!(config.cache.default_extension, ".yml");
    }

    #[test]
    fn test_from_yaml() {
        let config = Config::from_yaml_str(
            "engine:\n  throw_on_missing: false\n  empty_path: reject\n\
             tags:\n  empty_tokens: reject\n\
             cache:\n  base_dir: fixtures/yaml\n",
        )
        .unwrap();

        assert!(!config.engine.throw_on_missing);
        assert_eq!(config.engine.empty_path, EmptyPathPolicy::Reject);
        assert_eq!(config.tags.empty_tokens, EmptyTokenPolicy::Reject);
        assert!(config.tag_compiler().compile("a,,b").is_err());

        let cache = config.document_cache(MemoryLoader::new());
        assert_eq!(cache.key_for("common").unwrap(), "fixtures/yaml/common.yml");
    }

    #[test]
    fn test_invalid() {
        let err = Config::from_json_str(r#"{"engine": {"throw_on_missing": "yes"}}"#).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }
}
