//! Error types for document path resolution
//!
//! Every failure that crosses the library boundary is one of three kinds,
//! carried by a single [`DocPathError`] enum.

use thiserror::Error;

/// Result type alias for docpath operations
pub type Result<T> = std::result::Result<T, DocPathError>;

/// Classification of a [`DocPathError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The path does not designate a value in the document
    InvalidPath,
    /// The path resolved, but to a value of another kind
    WrongType,
    /// Malformed input handed to a constructor or builder call
    InvalidArgument,
}

/// Error type for path resolution, typed extraction and cache lookups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocPathError {
    /// Path is malformed or does not resolve against the document
    #[error("Invalid path{}: {message}", path.as_ref().map(|p| format!(" '{p}'")).unwrap_or_default())]
    InvalidPath {
        /// Human-readable reason
        message: String,
        /// Offending path, when known
        path: Option<String>,
    },

    /// Resolved value has a different kind than requested
    #[error("Wrong type at '{path}': expected {expected}, actual type is {actual}")]
    WrongType {
        /// Requested kind
        expected: String,
        /// Kind actually found
        actual: String,
        /// Path that was resolved
        path: String,
    },

    /// Malformed construction input
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable reason
        message: String,
    },
}

impl DocPathError {
    /// Create an invalid path error for a known path
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a wrong type error
    pub fn wrong_type(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::WrongType {
            expected: expected.into(),
            actual: actual.into(),
            path: path.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocPathError::InvalidPath { .. } => ErrorKind::InvalidPath,
            DocPathError::WrongType { .. } => ErrorKind::WrongType,
            DocPathError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            DocPathError::InvalidPath { path, .. } => path.as_deref(),
            DocPathError::WrongType { path, .. } => Some(path),
            DocPathError::InvalidArgument { .. } => None,
        }
    }

    /// Whether the error signals missing data rather than a caller mistake
    pub fn is_missing(&self) -> bool {
        self.kind() == ErrorKind::InvalidPath
    }
}
