//! Loaded corpora and their load bookkeeping.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use verbgraph_core::{CorpusKind, CorpusTree, ReadError, ReadOutcome, ReaderOptions, Statistics};
use verbgraph_ingest_tabular::{bso, reference, semnet};
use verbgraph_ingest_xml::{framenet, ontonotes, propbank, verbnet};

/// One successfully loaded corpus. Replaced wholesale on reload.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusRecord {
    pub kind: CorpusKind,
    pub tree: CorpusTree,
    pub statistics: Statistics,
    pub source_dir: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

impl CorpusRecord {
    pub fn new(kind: CorpusKind, outcome: ReadOutcome<CorpusTree>, source_dir: &Path) -> Self {
        Self {
            kind,
            tree: outcome.tree,
            statistics: outcome.statistics,
            source_dir: source_dir.to_path_buf(),
            loaded_at: Utc::now(),
        }
    }

    /// The tree as JSON with its `statistics` sub-map attached.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        let mut value = self.tree.to_value()?;
        if let Value::Object(map) = &mut value {
            map.insert("statistics".to_string(), serde_json::to_value(&self.statistics)?);
        }
        Ok(value)
    }
}

/// Run the reader registered for `kind` over `dir`.
pub fn read_corpus(
    kind: CorpusKind,
    dir: &Path,
    options: &ReaderOptions,
) -> Result<ReadOutcome<CorpusTree>, ReadError> {
    Ok(match kind {
        CorpusKind::VerbNet => verbnet::read(dir, options)?.map(CorpusTree::VerbNet),
        CorpusKind::FrameNet => framenet::read(dir, options)?.map(CorpusTree::FrameNet),
        CorpusKind::PropBank => propbank::read(dir, options)?.map(CorpusTree::PropBank),
        CorpusKind::OntoNotes => ontonotes::read(dir, options)?.map(CorpusTree::OntoNotes),
        CorpusKind::WordNet => verbgraph_ingest_wordnet::read(dir, options)?.map(CorpusTree::WordNet),
        CorpusKind::Bso => bso::read(dir, options)?.map(CorpusTree::Bso),
        CorpusKind::SemNet => semnet::read(dir, options)?.map(CorpusTree::SemNet),
        CorpusKind::ReferenceDocs => reference::read(dir, options)?.map(CorpusTree::ReferenceDocs),
    })
}

// ============================================================================
// Load bookkeeping
// ============================================================================

/// Per-corpus lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    LoadError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Success,
    Error,
    NotFound,
}

/// Outcome of one corpus within `load_all`.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub status: LoadStatus,
    /// Wall-clock read time in seconds; absent for corpora that were not found.
    pub duration_secs: Option<f64>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_files: Option<usize>,
}

impl LoadReport {
    pub fn not_found() -> Self {
        Self {
            status: LoadStatus::NotFound,
            duration_secs: None,
            timestamp: Utc::now(),
            error: None,
            error_files: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verbgraph_core::{FileTally, VerbNetCorpus};

    #[test]
    fn value_projection_carries_statistics() {
        let mut tally = FileTally::default();
        tally.parsed();
        let outcome = tally
            .finish(VerbNetCorpus::default(), [("total_classes", 0)])
            .map(CorpusTree::VerbNet);
        let record = CorpusRecord::new(CorpusKind::VerbNet, outcome, Path::new("vn"));

        let value = record.to_value().unwrap();
        assert!(value["classes"].is_object());
        assert_eq!(value["statistics"]["parsed_files"], 1);
        assert!(value.get("corpus").is_none());
    }

    #[test]
    fn load_state_serializes_with_error_text() {
        let json = serde_json::to_value(LoadState::LoadError("boom".into())).unwrap();
        assert_eq!(json["state"], "load_error");
        assert_eq!(json["error"], "boom");
        assert_eq!(serde_json::to_value(LoadState::Loaded).unwrap()["state"], "loaded");
    }
}
