//! Memoizing document cache
//!
//! [`DocumentCache`] maps a logical document name to a loaded [`Document`].
//! Names are normalized into a fully qualified key (base directory, name,
//! default extension) and each key is loaded at most once per successful
//! load. The cache is an explicit object owned by whoever composes the
//! application; there is no process-wide instance.

pub mod loader;

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::engine::{EngineOptions, PathEngine};
use crate::error::{DocPathError, Result};
use crate::model::Document;

pub use loader::{DocumentLoader, MemoryLoader};

/// Name of the shared document every suite can rely on
pub const COMMON_DOCUMENT_NAME: &str = "common";

/// Extension appended to names that lack it
pub const DEFAULT_EXTENSION: &str = ".yml";

/// Configuration for key normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory prefix for every key
    pub base_dir: String,
    /// Extension appended when the name does not end with it
    pub default_extension: String,
    /// Options for engines handed out by the cache
    pub engine: EngineOptions,
}

impl CacheConfig {
    /// Create a configuration rooted at `base_dir`
    pub fn new(base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Configuration for a single file path, taking its extension as the
    /// default so `conf.json` stays `conf.json`. Paths without an extension
    /// fall back to [`DEFAULT_EXTENSION`].
    pub fn for_file(path: &str) -> Self {
        let default_extension = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        Self {
            default_extension,
            ..Self::default()
        }
    }

    /// Base directory with a trailing `/` when non-empty
    fn normalized_base_dir(&self) -> String {
        if self.base_dir.is_empty() || self.base_dir.ends_with('/') {
            self.base_dir.clone()
        } else {
            format!("{}/", self.base_dir)
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            base_dir: String::new(),
            default_extension: DEFAULT_EXTENSION.to_string(),
            engine: EngineOptions::default(),
        }
    }
}

/// Thread-safe cache of loaded documents
pub struct DocumentCache<L> {
    config: CacheConfig,
    loader: L,
    documents: DashMap<String, Arc<Document>>,
}

impl<L: DocumentLoader> DocumentCache<L> {
    /// Create a cache with the default configuration
    pub fn new(loader: L) -> Self {
        Self::with_config(CacheConfig::default(), loader)
    }

    /// Create a cache with an explicit configuration
    pub fn with_config(config: CacheConfig, loader: L) -> Self {
        Self {
            config,
            loader,
            documents: DashMap::new(),
        }
    }

    /// Configuration of this cache
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Engine configured with the cache's engine options
    pub fn engine(&self) -> PathEngine {
        PathEngine::with_options(self.config.engine)
    }

    /// Fully qualified key for a logical document name
    pub fn key_for(&self, name: &str) -> Result<String> {
        if name.trim().is_empty() {
            return Err(DocPathError::invalid_argument("Empty document name"));
        }

        let extension = &self.config.default_extension;
        let suffix = if name.ends_with(extension.as_str()) {
            ""
        } else {
            extension.as_str()
        };
        Ok(format!("{}{name}{suffix}", self.config.normalized_base_dir()))
    }

    /// Return the document for `name`, loading it on first use.
    ///
    /// Load failures are returned as
    /// [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument)
    /// and are not cached, so a later call retries the load.
    pub fn build(&self, name: &str) -> Result<Arc<Document>> {
        let key = self.key_for(name)?;
        if let Some(document) = self.documents.get(&key) {
            return Ok(Arc::clone(document.value()));
        }

        debug!("Loading document {key}");
        let root = self.loader.load(&key).map_err(|e| {
            DocPathError::invalid_argument(format!("Failed to load document '{key}': {e:#}"))
        })?;
        let document = Arc::new(Document::new(key.clone(), root)?);

        // A concurrent load may have won; everyone keeps the first insert
        match self.documents.entry(key) {
            Entry::Occupied(entry) => {
                warn!("Document {} was loaded concurrently, keeping the first copy", entry.key());
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&document));
                Ok(document)
            }
        }
    }

    /// Return the common document
    pub fn common(&self) -> Result<Arc<Document>> {
        self.build(COMMON_DOCUMENT_NAME)
    }

    /// Return the document named after type `T` (its short type name)
    pub fn build_for<T: ?Sized>(&self) -> Result<Arc<Document>> {
        self.build(short_type_name::<T>())
    }

    /// Check if the document for `name` is cached, without loading it
    pub fn has(&self, name: &str) -> bool {
        self.key_for(name)
            .is_ok_and(|key| self.documents.contains_key(&key))
    }

    /// Number of cached documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no document is cached
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Last path component of `T`'s type name, without generic arguments
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
