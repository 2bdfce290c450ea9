//! verbgraph corpus orchestration
//!
//! Ties the format readers together:
//!
//! - [`LoaderConfig`]: corpora root, alias overrides and reader limits,
//! - [`discovery`]: alias probing under the corpora root,
//! - [`CorpusLoader`]: single and best-effort bulk loading with per-corpus
//!   state and timing,
//! - [`builder`]: the derived reference collections,
//! - [`validator`]: structural and cross-corpus checks over loaded trees,
//! - [`analyzer`]: read-only statistics and metadata for reporting.
//!
//! Mutation (`load`, `reload`, `load_all`, `build_reference_collections`)
//! takes `&mut self`; validation and analysis take `&self`, so nothing can
//! read a tree while it is being replaced.

pub mod analyzer;
pub mod builder;
pub mod config;
pub mod discovery;
pub mod loader;
pub mod record;
pub mod validator;

pub use analyzer::{BuildMetadata, Metadata};
pub use builder::{BuildOutcome, ReferenceCollections};
pub use config::LoaderConfig;
pub use loader::{CorpusLoader, LoadError};
pub use record::{CorpusRecord, LoadReport, LoadState, LoadStatus};
pub use validator::{CrossReferenceResult, CrossReferenceStatus, ValidationResult, ValidationStatus};
