//! Path and key template parsing
//!
//! Paths are parsed with nom into a list of segments. Key templates are
//! expanded textually into path strings before parsing.

#![warn(missing_docs)]

pub mod path;
pub mod template;

pub use path::{Path, SEGMENT_SEPARATOR, Segment};
pub use template::{KeyTemplate, PLACEHOLDER};

/// Parse a path expression
pub fn parse_path(source: &str) -> crate::Result<Path> {
    Path::parse(source)
}
