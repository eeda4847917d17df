//! Key templates
//!
//! A key template is a path containing `?` placeholders. Expansion is
//! purely textual: each argument replaces the first `?` still present in
//! the text, left to right. Surplus arguments are ignored and missing ones
//! leave a literal `?` behind.

use std::fmt;

/// Placeholder character
pub const PLACEHOLDER: char = '?';

/// Path text with positional `?` placeholders
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyTemplate {
    source: String,
}

impl KeyTemplate {
    /// Create a template from its text
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Number of placeholders in the template
    pub fn placeholder_count(&self) -> usize {
        self.source.matches(PLACEHOLDER).count()
    }

    /// Substitute `args` into the template
    pub fn expand<I>(&self, args: I) -> String
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let mut key = self.source.clone();
        for arg in args {
            if let Some(at) = key.find(PLACEHOLDER) {
                key.replace_range(at..at + PLACEHOLDER.len_utf8(), &arg.to_string());
            }
        }
        key
    }

    /// Template text
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for KeyTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for KeyTemplate {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}
