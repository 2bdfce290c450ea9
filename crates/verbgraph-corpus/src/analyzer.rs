//! Read-only statistics and metadata over loaded corpora.

use crate::builder::ReferenceCollections;
use crate::record::{CorpusRecord, LoadState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use verbgraph_core::{CorpusKind, Statistics};

/// Key of the reference-collection sizes in [`collection_statistics`].
pub const REFERENCE_COLLECTIONS: &str = "reference_collections";

/// Canonical countable top-level fields per corpus kind.
pub fn count_fields(kind: CorpusKind) -> &'static [&'static str] {
    match kind {
        CorpusKind::VerbNet => &["classes", "members"],
        CorpusKind::FrameNet => &["frames", "lexical_units"],
        CorpusKind::PropBank => &["predicates", "rolesets"],
        _ => &[],
    }
}

fn size_of(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Object(entries)) => entries.len() as u64,
        Some(Value::Array(items)) => items.len() as u64,
        _ => 0,
    }
}

/// Counts for one record: its reader statistics plus the canonical fields.
pub fn corpus_statistics(record: &CorpusRecord) -> Statistics {
    let mut stats = record.statistics.clone();
    let fields = count_fields(record.kind);
    if fields.is_empty() {
        return stats;
    }
    let tree = match record.tree.to_value() {
        Ok(tree) => tree,
        Err(err) => {
            tracing::warn!(corpus = %record.kind, error = %err, "cannot project tree for statistics");
            Value::Null
        }
    };
    for field in fields {
        stats.insert(field.to_string(), size_of(tree.get(field)));
    }
    stats
}

/// Per-corpus statistics keyed by corpus name, plus reference collection sizes.
pub fn collection_statistics(
    corpora: &BTreeMap<CorpusKind, CorpusRecord>,
    references: Option<&ReferenceCollections>,
) -> BTreeMap<String, Statistics> {
    let mut stats: BTreeMap<String, Statistics> = corpora
        .iter()
        .map(|(kind, record)| (kind.as_str().to_string(), corpus_statistics(record)))
        .collect();
    stats.insert(
        REFERENCE_COLLECTIONS.to_string(),
        references.map(ReferenceCollections::sizes).unwrap_or_default(),
    );
    stats
}

// ============================================================================
// Metadata
// ============================================================================

/// Timing recorded by the loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildMetadata {
    pub last_load_all: Option<DateTime<Utc>>,
    pub last_reference_build: Option<DateTime<Utc>>,
    /// Seconds spent reading each corpus on its latest load.
    pub load_durations: BTreeMap<CorpusKind, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub load_status: BTreeMap<CorpusKind, LoadState>,
    pub build_metadata: BuildMetadata,
    pub corpus_paths: BTreeMap<CorpusKind, PathBuf>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_from;
    use std::path::Path;
    use verbgraph_core::{CorpusTree, FileTally, SemNetCorpus, VerbClass, VerbNetCorpus};

    fn record(tree: CorpusTree) -> CorpusRecord {
        let kind = tree.kind();
        let mut tally = FileTally::default();
        tally.parsed();
        CorpusRecord::new(kind, tally.finish(tree, [("total_items", 1)]), Path::new("corpus"))
    }

    #[test]
    fn counts_canonical_fields_and_keeps_reader_statistics() {
        let mut verbnet = VerbNetCorpus::default();
        verbnet.classes.insert(
            "give-13.1".to_string(),
            VerbClass {
                id: "give-13.1".to_string(),
                ..Default::default()
            },
        );
        verbnet
            .members
            .insert("give".to_string(), vec!["give-13.1".to_string()]);
        let corpora = BTreeMap::from([
            (CorpusKind::VerbNet, record(CorpusTree::VerbNet(verbnet))),
            (CorpusKind::SemNet, record(CorpusTree::SemNet(SemNetCorpus::default()))),
        ]);

        let stats = collection_statistics(&corpora, None);
        assert_eq!(stats["verbnet"]["classes"], 1);
        assert_eq!(stats["verbnet"]["members"], 1);
        assert_eq!(stats["verbnet"]["parsed_files"], 1);
        assert_eq!(stats["semnet"]["parsed_files"], 1);
        assert!(!stats["semnet"].contains_key("classes"));
        assert!(stats[REFERENCE_COLLECTIONS].is_empty());
    }

    #[test]
    fn reference_sizes_are_reported() {
        let collections = build_from(Some(&VerbNetCorpus::default()), None);
        let stats = collection_statistics(&BTreeMap::new(), Some(&collections));
        assert_eq!(stats[REFERENCE_COLLECTIONS]["predicates"], 0);
        assert_eq!(stats[REFERENCE_COLLECTIONS].len(), 5);
    }
}
