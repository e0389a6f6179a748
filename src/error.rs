//! Error types for manifest decoding and output slicing

use serde_json::error::Category;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a manifest decode failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeCategory {
    /// The bytes are not well-formed JSON
    Syntax,
    /// The document ended in the middle of a value
    Eof,
    /// Well-formed JSON whose values do not have the expected shape
    Shape,
}

/// Failure to decode a `project.assets.json` document
///
/// The serde_json message is part of the display text, so the wrapped error
/// is not reported again as a source.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON syntax: {0}")]
    Syntax(serde_json::Error),
    #[error("unexpected end of JSON input: {0}")]
    Eof(serde_json::Error),
    #[error("unexpected value in assets file: {0}")]
    Shape(serde_json::Error),
}

impl DecodeError {
    pub fn category(&self) -> DecodeCategory {
        match self {
            DecodeError::Syntax(_) => DecodeCategory::Syntax,
            DecodeError::Eof(_) => DecodeCategory::Eof,
            DecodeError::Shape(_) => DecodeCategory::Shape,
        }
    }

    /// One-based line of the offending input
    pub fn line(&self) -> usize {
        self.inner().line()
    }

    /// One-based column of the offending input
    pub fn column(&self) -> usize {
        self.inner().column()
    }

    fn inner(&self) -> &serde_json::Error {
        match self {
            DecodeError::Syntax(e) | DecodeError::Eof(e) | DecodeError::Shape(e) => e,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => DecodeError::Shape(err),
            Category::Eof => DecodeError::Eof(err),
            Category::Syntax | Category::Io => DecodeError::Syntax(err),
        }
    }
}

/// Failure of a slicing run; no partial slices are produced
#[derive(Error, Debug)]
pub enum SliceError {
    #[error("opening assets file to identify output slices: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("decoding JSON to identify output slices: {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}
