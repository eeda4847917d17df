//! Document path queries and tag expressions for test automation
//!
//! Three independent pieces:
//!
//! * [`PathEngine`] resolves dotted, array-indexed paths such as
//!   `key1.array2[0].key3` (optionally templated with `?` placeholders)
//!   against a loaded [`Document`].
//! * [`TagCompiler`] normalizes a tag selection like `"wip fun01,~fun02"`
//!   into clauses for a test runner.
//! * [`DocumentCache`] loads each named document once through a
//!   [`DocumentLoader`] and shares it afterwards.
//!
//! ```
//! use docpath::{Document, PathEngine, compile_tags};
//!
//! let doc = Document::from_yaml_str("users:\n  - name: samuel\n").unwrap();
//! let engine = PathEngine::new();
//! assert_eq!(
//!     engine.get_string(&doc, "users[0].name").unwrap().as_deref(),
//!     Some("samuel")
//! );
//! assert_eq!(compile_tags("billing,~wip important"), ["@billing,~@wip", "@important"]);
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod tags;

// Re-export main types
pub use cache::{COMMON_DOCUMENT_NAME, CacheConfig, DocumentCache, DocumentLoader, MemoryLoader};
pub use config::Config;
pub use engine::{EmptyPathPolicy, EngineOptions, PathEngine};
pub use error::{DocPathError, ErrorKind, Result};
pub use model::{Document, FromValue, Mapping, Value, ValueKind, ValueType};
pub use parser::{KeyTemplate, Path, Segment, parse_path};
pub use tags::{Clause, TagCompiler, TagExpression, TagOptions, TagToken, compile_tags};
