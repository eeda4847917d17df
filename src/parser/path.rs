//! Path expressions
//!
//! ```text
//! path        := segment ("." segment)*
//! segment     := identifier | identifier "[" digits "]"
//! identifier  := any run of characters excluding "." and "["
//! digits      := one or more decimal digits
//! ```
//!
//! Parsing never looks at a document; a parsed [`Path`] is a fixed descent
//! route that the engine later walks.

use std::fmt;
use std::str::FromStr;

use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt},
    multi::separated_list1,
    sequence::delimited,
};
use smallvec::SmallVec;

use crate::error::{DocPathError, Result};

/// Separator between segments
pub const SEGMENT_SEPARATOR: char = '.';

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Bare field name
    Field(String),
    /// Field holding a sequence, followed by an element index
    Indexed {
        /// Field name
        name: String,
        /// 0-based element index
        index: usize,
    },
}

impl Segment {
    /// Field name looked up in the current mapping
    pub fn name(&self) -> &str {
        match self {
            Segment::Field(name) | Segment::Indexed { name, .. } => name,
        }
    }

    /// Element index, for indexed segments
    pub fn index(&self) -> Option<usize> {
        match self {
            Segment::Field(_) => None,
            Segment::Indexed { index, .. } => Some(*index),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Indexed { name, index } => write!(f, "{name}[{index}]"),
        }
    }
}

/// Parsed path expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    source: String,
    segments: SmallVec<[Segment; 4]>,
}

impl Path {
    /// Parse a path expression.
    ///
    /// The empty string parses to a path with no segments.
    pub fn parse(source: &str) -> Result<Self> {
        if source.is_empty() {
            return Ok(Self {
                source: String::new(),
                segments: SmallVec::new(),
            });
        }

        match segments(source) {
            Ok((_, segments)) => Ok(Self {
                source: source.to_string(),
                segments: segments.into_iter().collect(),
            }),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                let position = source.len() - e.input.len();
                Err(DocPathError::invalid_path(
                    source,
                    syntax_message(position, e.input),
                ))
            }
            Err(nom::Err::Incomplete(_)) => Err(DocPathError::invalid_path(
                source,
                "unexpected end of path",
            )),
        }
    }

    /// Segments in descent order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Source text of the path
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Path {
    type Err = DocPathError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

fn syntax_message(position: usize, rest: &str) -> String {
    match rest.chars().next() {
        Some('[') => format!("malformed index at position {position}, expected '[' digits ']'"),
        Some(c) => format!("unexpected '{c}' at position {position}"),
        None => format!("unexpected end of path at position {position}"),
    }
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == SEGMENT_SEPARATOR || c == '[').parse(input)
}

fn index(input: &str) -> IResult<&str, usize> {
    delimited(char('['), map_res(digit1, str::parse::<usize>), char(']')).parse(input)
}

fn segment(input: &str) -> IResult<&str, Segment> {
    (identifier, opt(index))
        .map(|(name, index)| match index {
            Some(index) => Segment::Indexed {
                name: name.to_string(),
                index,
            },
            None => Segment::Field(name.to_string()),
        })
        .parse(input)
}

fn segments(input: &str) -> IResult<&str, Vec<Segment>> {
    all_consuming(separated_list1(char(SEGMENT_SEPARATOR), segment)).parse(input)
}
