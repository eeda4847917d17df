//! Document model
//!
//! This module provides the in-memory document tree queried by the path
//! engine, together with the typed extraction used by typed lookups.

#![warn(missing_docs)]

pub mod document;
pub mod types;
pub mod value;

pub use document::Document;
pub use types::{FromValue, ValueType};
pub use value::{Mapping, Value, ValueKind};
