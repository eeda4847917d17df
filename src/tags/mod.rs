//! Tag expression compiler
//!
//! Turns a compact tag selection such as `"~billing,todo important,~wip"`
//! into normalized clauses (`["~@billing,@todo", "@important,~@wip"]`).
//! A space separates clauses that must all match, a comma separates tags
//! of which one must match, `~` negates a tag and the `@` sigil is added
//! when missing. The compiler only produces the clause list; applying the
//! AND/OR semantics is up to the test runner that consumes it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DocPathError, Result};

/// Separator between clauses (AND)
pub const AND_SEPARATOR: char = ' ';
/// Separator between tags of a clause (OR)
pub const OR_SEPARATOR: char = ',';
/// Negation prefix
pub const NEGATION: char = '~';
/// Tag sigil
pub const SIGIL: char = '@';

/// Behaviour for empty tokens, e.g. from doubled separators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTokenPolicy {
    /// Keep empty tokens as empty tags
    #[default]
    Keep,
    /// Reject the expression
    Reject,
}

/// Compiler options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagOptions {
    /// Behaviour for empty tokens
    pub empty_tokens: EmptyTokenPolicy,
}

/// One OR-token of a clause
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagToken {
    /// Empty token
    Blank,
    /// Sigil-prefixed, possibly negated tag
    Tag {
        /// Whether the tag is negated with `~`
        negated: bool,
        /// Tag text after the sigil
        name: String,
    },
}

impl TagToken {
    /// Normalize a raw token.
    ///
    /// Tokens already of the form `[~]@text` keep their text; otherwise the
    /// sigil is inserted after an optional leading `~`.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return TagToken::Blank;
        }

        let (negated, rest) = match raw.strip_prefix(NEGATION) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let name = rest.strip_prefix(SIGIL).unwrap_or(rest);

        TagToken::Tag {
            negated,
            name: name.to_string(),
        }
    }

    /// Check if the token is empty
    pub fn is_blank(&self) -> bool {
        matches!(self, TagToken::Blank)
    }
}

impl fmt::Display for TagToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagToken::Blank => Ok(()),
            TagToken::Tag { negated, name } => {
                if *negated {
                    write!(f, "{NEGATION}")?;
                }
                write!(f, "{SIGIL}{name}")
            }
        }
    }
}

/// OR-group of tags
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    tokens: Vec<TagToken>,
}

impl Clause {
    /// Parse one AND-group
    pub fn parse(group: &str) -> Self {
        Self {
            tokens: group.split(OR_SEPARATOR).map(TagToken::parse).collect(),
        }
    }

    /// Tokens in their original order
    pub fn tokens(&self) -> &[TagToken] {
        &self.tokens
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, "{OR_SEPARATOR}")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Compiled tag expression: every clause must match
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TagExpression {
    clauses: Vec<Clause>,
}

impl TagExpression {
    /// Parse a tag expression. Blank input yields no clauses.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::default();
        }

        Self {
            clauses: input.split(AND_SEPARATOR).map(Clause::parse).collect(),
        }
    }

    /// Clauses in input order
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Check if there are no clauses
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Check if any clause holds an empty token
    pub fn has_blank_tokens(&self) -> bool {
        self.clauses
            .iter()
            .any(|clause| clause.tokens.iter().any(TagToken::is_blank))
    }

    /// Normalized clause strings
    pub fn to_strings(&self) -> Vec<String> {
        self.clauses.iter().map(Clause::to_string).collect()
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, "{AND_SEPARATOR}")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// Tag expression compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagCompiler {
    options: TagOptions,
}

impl TagCompiler {
    /// Create a compiler that keeps empty tokens
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with explicit options
    pub fn with_options(options: TagOptions) -> Self {
        Self { options }
    }

    /// Create a compiler that rejects empty tokens
    pub fn strict() -> Self {
        Self::with_options(TagOptions {
            empty_tokens: EmptyTokenPolicy::Reject,
        })
    }

    /// Compile `input` into a tag expression
    pub fn compile(&self, input: &str) -> Result<TagExpression> {
        let expression = TagExpression::parse(input);
        if self.options.empty_tokens == EmptyTokenPolicy::Reject && expression.has_blank_tokens() {
            return Err(DocPathError::invalid_argument(format!(
                "Tag expression '{input}' contains an empty tag"
            )));
        }
        Ok(expression)
    }
}

/// Compile `input` into normalized clause strings, keeping empty tokens
pub fn compile_tags(input: &str) -> Vec<String> {
    TagExpression::parse(input).to_strings()
}
