//! verbgraph core
//!
//! Shared vocabulary for every crate in the workspace:
//!
//! - [`CorpusKind`] and the directory-alias table used for discovery,
//! - the normalized, serde-friendly model of each lexical resource
//!   (VerbNet, FrameNet, PropBank, OntoNotes, WordNet, BSO, SemNet and the
//!   reference documentation),
//! - the per-file / per-directory error taxonomy,
//! - [`ReadOutcome`] (tree + statistics + error count) returned by every reader,
//! - helpers for listing corpus files and parsing them on a bounded worker pool.
//!
//! Readers live in the `verbgraph-ingest-*` crates; orchestration, derived
//! reference collections and validation live in `verbgraph-corpus`.

pub mod error;
pub mod fanout;
pub mod files;
pub mod kind;
pub mod model;
pub mod outcome;

pub use error::{ParseError, ReadError};
pub use fanout::parse_files;
pub use kind::CorpusKind;
pub use model::*;
pub use outcome::{FileTally, ReadOutcome, ReaderOptions, Statistics};
