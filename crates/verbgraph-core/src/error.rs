//! Error taxonomy shared by every reader.
//!
//! A [`ParseError`] never escapes a reader: it is logged, the file is skipped
//! and counted in `error_files`. A [`ReadError`] means the corpus directory
//! itself could not be enumerated and is surfaced to the orchestrator.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is {size} bytes, above the {limit} byte ceiling", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("malformed XML in {}: {message}", .path.display())]
    Xml { path: PathBuf, message: String },

    #[error("{}: expected root element `{expected}`, found `{found}`", .path.display())]
    UnexpectedRoot {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("{}: nesting exceeds {limit} levels", .path.display())]
    DepthExceeded { path: PathBuf, limit: usize },

    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

impl ParseError {
    pub fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ParseError::Invalid {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("corpus directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("cannot list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
