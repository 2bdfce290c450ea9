//! Corpus ingestion orchestrator.

use crate::analyzer::{self, BuildMetadata, Metadata};
use crate::builder::{self, ReferenceCollections};
use crate::config::LoaderConfig;
use crate::discovery;
use crate::record::{self, CorpusRecord, LoadReport, LoadState, LoadStatus};
use crate::validator::{self, CrossReferenceResult, ValidationResult};
use chrono::Utc;
use rayon::prelude::*;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use verbgraph_core::kind::UnknownCorpusKind;
use verbgraph_core::{
    BsoMapping, CorpusKind, CorpusTree, ReadError, ReadOutcome, Statistics, VerbClass,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no directory for corpus `{kind}` under {}", .root.display())]
    Discovery { kind: CorpusKind, root: PathBuf },

    #[error(transparent)]
    UnknownCorpus(#[from] UnknownCorpusKind),

    #[error("failed to load {kind}: {source}")]
    Read {
        kind: CorpusKind,
        #[source]
        source: ReadError,
    },
}

/// Reference collections depend on these; a failed reload drops the cache.
fn feeds_references(kind: CorpusKind) -> bool {
    matches!(kind, CorpusKind::VerbNet | CorpusKind::ReferenceDocs)
}

/// Owns every loaded corpus and the reference collections derived from them.
pub struct CorpusLoader {
    config: LoaderConfig,
    paths: BTreeMap<CorpusKind, PathBuf>,
    records: BTreeMap<CorpusKind, CorpusRecord>,
    states: BTreeMap<CorpusKind, LoadState>,
    references: Option<ReferenceCollections>,
    build_metadata: BuildMetadata,
}

impl CorpusLoader {
    /// Create a loader and discover corpus directories under the configured root.
    pub fn new(config: LoaderConfig) -> Self {
        let paths = discovery::discover(&config);
        Self {
            config,
            paths,
            records: BTreeMap::new(),
            states: BTreeMap::new(),
            references: None,
            build_metadata: BuildMetadata::default(),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn corpus_paths(&self) -> &BTreeMap<CorpusKind, PathBuf> {
        &self.paths
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Load one corpus, reusing the loaded record if there is one.
    pub fn load(&mut self, kind: CorpusKind) -> Result<&CorpusRecord, LoadError> {
        if !self.records.contains_key(&kind) {
            return self.reload(kind);
        }
        Ok(&self.records[&kind])
    }

    pub fn load_by_name(&mut self, name: &str) -> Result<&CorpusRecord, LoadError> {
        let kind: CorpusKind = name.parse()?;
        self.load(kind)
    }

    /// Parse `kind` again and replace its record. On failure the previous
    /// record is dropped.
    pub fn reload(&mut self, kind: CorpusKind) -> Result<&CorpusRecord, LoadError> {
        let Some(dir) = self.paths.get(&kind).cloned() else {
            return Err(LoadError::Discovery {
                kind,
                root: self.config.corpora_root.clone(),
            });
        };

        self.states.insert(kind, LoadState::Loading);
        let started = Instant::now();
        let result = record::read_corpus(kind, &dir, &self.config.reader);
        self.build_metadata
            .load_durations
            .insert(kind, started.elapsed().as_secs_f64());

        match result {
            Ok(outcome) => Ok(self.store(kind, outcome, &dir)),
            Err(source) => {
                self.fail(kind, &source);
                Err(LoadError::Read { kind, source })
            }
        }
    }

    /// Load every discovered corpus. Failures are isolated per corpus and
    /// reported, never returned; undiscovered corpora are `not_found`.
    /// Reference collections are rebuilt afterwards.
    pub fn load_all(&mut self) -> BTreeMap<CorpusKind, LoadReport> {
        let started = Instant::now();
        let targets: Vec<(CorpusKind, PathBuf)> = self
            .paths
            .iter()
            .map(|(kind, dir)| (*kind, dir.clone()))
            .collect();
        for (kind, _) in &targets {
            self.states.insert(*kind, LoadState::Loading);
        }

        let options = &self.config.reader;
        let read = |(kind, dir): &(CorpusKind, PathBuf)| {
            let timestamp = Utc::now();
            let started = Instant::now();
            let result = record::read_corpus(*kind, dir, options);
            (*kind, timestamp, started.elapsed().as_secs_f64(), result)
        };
        let results: Vec<_> = if self.config.parallel_corpora {
            targets.par_iter().map(read).collect()
        } else {
            targets.iter().map(read).collect()
        };

        let mut reports = BTreeMap::new();
        for ((kind, timestamp, secs, result), (_, dir)) in results.into_iter().zip(&targets) {
            self.build_metadata.load_durations.insert(kind, secs);
            let report = match result {
                Ok(outcome) => {
                    let error_files = outcome.error_files;
                    self.store(kind, outcome, dir);
                    LoadReport {
                        status: LoadStatus::Success,
                        duration_secs: Some(secs),
                        timestamp,
                        error: None,
                        error_files: Some(error_files),
                    }
                }
                Err(err) => {
                    self.fail(kind, &err);
                    LoadReport {
                        status: LoadStatus::Error,
                        duration_secs: Some(secs),
                        timestamp,
                        error: Some(err.to_string()),
                        error_files: None,
                    }
                }
            };
            reports.insert(kind, report);
        }
        for kind in CorpusKind::ALL {
            reports.entry(kind).or_insert_with(LoadReport::not_found);
        }

        self.build_metadata.last_load_all = Some(Utc::now());
        self.build_reference_collections(true);

        let count = |status: LoadStatus| reports.values().filter(|r| r.status == status).count();
        tracing::info!(
            loaded = count(LoadStatus::Success),
            failed = count(LoadStatus::Error),
            not_found = count(LoadStatus::NotFound),
            elapsed_secs = started.elapsed().as_secs_f64(),
            "finished loading corpora"
        );
        reports
    }

    fn store(&mut self, kind: CorpusKind, outcome: ReadOutcome<CorpusTree>, dir: &Path) -> &CorpusRecord {
        tracing::info!(
            corpus = %kind,
            path = %dir.display(),
            error_files = outcome.error_files,
            "loaded corpus"
        );
        self.states.insert(kind, LoadState::Loaded);
        let record = CorpusRecord::new(kind, outcome, dir);
        match self.records.entry(kind) {
            Entry::Occupied(mut slot) => {
                slot.insert(record);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(record),
        }
    }

    fn fail(&mut self, kind: CorpusKind, error: &ReadError) {
        tracing::error!(corpus = %kind, error = %error, "failed to load corpus");
        self.records.remove(&kind);
        self.states.insert(kind, LoadState::LoadError(error.to_string()));
        if feeds_references(kind) && self.references.take().is_some() {
            tracing::warn!(corpus = %kind, "discarded reference collections built from a corpus that failed to reload");
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn corpus(&self, kind: CorpusKind) -> Option<&CorpusRecord> {
        self.records.get(&kind)
    }

    pub fn corpora(&self) -> &BTreeMap<CorpusKind, CorpusRecord> {
        &self.records
    }

    pub fn state(&self, kind: CorpusKind) -> LoadState {
        self.states.get(&kind).cloned().unwrap_or_default()
    }

    // ========================================================================
    // Reference collections, validation, analysis
    // ========================================================================

    /// Build the reference collections from the loaded corpora. A cached
    /// result is returned unless `force` is set.
    pub fn build_reference_collections(&mut self, force: bool) -> &ReferenceCollections {
        if force || self.references.is_none() {
            let built = builder::build(&self.records);
            self.build_metadata.last_reference_build = Some(Utc::now());
            self.references = Some(built);
        }
        self.references
            .get_or_insert_with(|| builder::build(&self.records))
    }

    pub fn reference_collections(&self) -> Option<&ReferenceCollections> {
        self.references.as_ref()
    }

    pub fn validate_collections(&self) -> BTreeMap<String, ValidationResult> {
        validator::validate_collections(&self.records, self.references.as_ref())
    }

    pub fn validate_cross_references(&self) -> BTreeMap<String, CrossReferenceResult> {
        validator::validate_cross_references(&self.records)
    }

    pub fn collection_statistics(&self) -> BTreeMap<String, Statistics> {
        analyzer::collection_statistics(&self.records, self.references.as_ref())
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            load_status: CorpusKind::ALL
                .into_iter()
                .map(|kind| (kind, self.state(kind)))
                .collect(),
            build_metadata: self.build_metadata.clone(),
            corpus_paths: self.paths.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Annotate VerbNet classes and subclasses with their BSO category.
    /// Returns the number of annotated classes; 0 unless both corpora are loaded.
    pub fn apply_bso_mappings(&mut self) -> usize {
        let (Some(bso), Some(verbnet)) = (
            self.records.get(&CorpusKind::Bso),
            self.records.get(&CorpusKind::VerbNet),
        ) else {
            tracing::debug!("BSO mappings need both bso and verbnet loaded");
            return 0;
        };
        let Some(mapping) = bso.tree.as_bso() else {
            return 0;
        };

        let mut updated = verbnet.clone();
        let Some(tree) = updated.tree.as_verbnet_mut() else {
            return 0;
        };
        let annotated = tree
            .classes
            .values_mut()
            .map(|class| annotate_bso(class, mapping))
            .sum::<usize>();
        self.records.insert(CorpusKind::VerbNet, updated);

        tracing::info!(annotated, "applied BSO categories to VerbNet classes");
        annotated
    }
}

/// Classes match by full id or by the number after the first `-`.
fn annotate_bso(class: &mut VerbClass, mapping: &BsoMapping) -> usize {
    let category = mapping.vn_to_bso.get(&class.id).or_else(|| {
        class
            .id
            .split_once('-')
            .and_then(|(_, number)| mapping.vn_to_bso.get(number))
    });
    let mut annotated = 0;
    if let Some(category) = category {
        class.bso_category = Some(category.clone());
        annotated += 1;
    }
    annotated
        + class
            .subclasses
            .iter_mut()
            .map(|sub| annotate_bso(sub, mapping))
            .sum::<usize>()
}
