//! Reference collections derived from the loaded corpora.
//!
//! Five collections are built independently of each other:
//!
//! | collection                 | source                                            |
//! |----------------------------|---------------------------------------------------|
//! | `predicates`               | reference docs, passed through                    |
//! | `themroles`                | reference docs, passed through                    |
//! | `verb_specific_features`   | VerbNet semantic predicates + reference-doc table |
//! | `syntactic_restrictions`   | VerbNet `SYNRESTR` on syntax elements             |
//! | `selectional_restrictions` | VerbNet `SELRESTR` on thematic roles              |
//!
//! A missing input only skips the collections that need it. Derived lists
//! are sorted and duplicate-free, so building twice from the same corpora
//! gives equal results.

use crate::record::CorpusRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use verbgraph_core::{CorpusKind, PredicateDefinition, ReferenceDocs, ThemroleDefinition, VerbNetCorpus};

pub const PREDICATES: &str = "predicates";
pub const THEMROLES: &str = "themroles";
pub const VERB_SPECIFIC_FEATURES: &str = "verb_specific_features";
pub const SYNTACTIC_RESTRICTIONS: &str = "syntactic_restrictions";
pub const SELECTIONAL_RESTRICTIONS: &str = "selectional_restrictions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildOutcome {
    Built { items: usize },
    Skipped { reason: String },
}

impl BuildOutcome {
    fn skipped(reason: &str) -> Self {
        BuildOutcome::Skipped {
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReferenceCollections {
    pub predicates: Option<BTreeMap<String, PredicateDefinition>>,
    pub themroles: Option<BTreeMap<String, ThemroleDefinition>>,
    pub verb_specific_features: Vec<String>,
    pub syntactic_restrictions: Vec<String>,
    pub selectional_restrictions: Vec<String>,
    /// Collection name -> how it was produced.
    pub report: BTreeMap<String, BuildOutcome>,
}

impl ReferenceCollections {
    /// Collection name -> number of entries (0 for skipped collections).
    pub fn sizes(&self) -> BTreeMap<String, u64> {
        BTreeMap::from([
            (PREDICATES.to_string(), self.predicates.as_ref().map_or(0, |p| p.len() as u64)),
            (THEMROLES.to_string(), self.themroles.as_ref().map_or(0, |t| t.len() as u64)),
            (VERB_SPECIFIC_FEATURES.to_string(), self.verb_specific_features.len() as u64),
            (SYNTACTIC_RESTRICTIONS.to_string(), self.syntactic_restrictions.len() as u64),
            (SELECTIONAL_RESTRICTIONS.to_string(), self.selectional_restrictions.len() as u64),
        ])
    }
}

/// Build every collection from whatever is loaded in `corpora`.
pub fn build(corpora: &BTreeMap<CorpusKind, CorpusRecord>) -> ReferenceCollections {
    let verbnet = corpora
        .get(&CorpusKind::VerbNet)
        .and_then(|record| record.tree.as_verbnet());
    let docs = corpora
        .get(&CorpusKind::ReferenceDocs)
        .and_then(|record| record.tree.as_reference_docs());
    build_from(verbnet, docs)
}

pub fn build_from(verbnet: Option<&VerbNetCorpus>, docs: Option<&ReferenceDocs>) -> ReferenceCollections {
    let mut collections = ReferenceCollections::default();

    match docs {
        Some(docs) => {
            collections.predicates = Some(docs.predicates.clone());
            collections.themroles = Some(docs.themroles.clone());
            collections.report.insert(
                PREDICATES.to_string(),
                BuildOutcome::Built { items: docs.predicates.len() },
            );
            collections.report.insert(
                THEMROLES.to_string(),
                BuildOutcome::Built { items: docs.themroles.len() },
            );
        }
        None => {
            for name in [PREDICATES, THEMROLES] {
                collections
                    .report
                    .insert(name.to_string(), BuildOutcome::skipped("reference_docs not loaded"));
            }
        }
    }

    if verbnet.is_none() && docs.is_none() {
        collections.report.insert(
            VERB_SPECIFIC_FEATURES.to_string(),
            BuildOutcome::skipped("neither verbnet nor reference_docs loaded"),
        );
    } else {
        collections.verb_specific_features = verb_specific_features(verbnet, docs);
        collections.report.insert(
            VERB_SPECIFIC_FEATURES.to_string(),
            BuildOutcome::Built {
                items: collections.verb_specific_features.len(),
            },
        );
    }

    match verbnet {
        Some(verbnet) => {
            collections.syntactic_restrictions = syntactic_restrictions(verbnet);
            collections.selectional_restrictions = selectional_restrictions(verbnet);
            collections.report.insert(
                SYNTACTIC_RESTRICTIONS.to_string(),
                BuildOutcome::Built {
                    items: collections.syntactic_restrictions.len(),
                },
            );
            collections.report.insert(
                SELECTIONAL_RESTRICTIONS.to_string(),
                BuildOutcome::Built {
                    items: collections.selectional_restrictions.len(),
                },
            );
        }
        None => {
            for name in [SYNTACTIC_RESTRICTIONS, SELECTIONAL_RESTRICTIONS] {
                collections
                    .report
                    .insert(name.to_string(), BuildOutcome::skipped("verbnet not loaded"));
            }
        }
    }

    tracing::info!(
        verb_specific_features = collections.verb_specific_features.len(),
        syntactic_restrictions = collections.syntactic_restrictions.len(),
        selectional_restrictions = collections.selectional_restrictions.len(),
        "built reference collections"
    );
    collections
}

/// Semantic predicate names used anywhere in VerbNet, plus the keys of the
/// reference-docs verb-specific table.
pub fn verb_specific_features(verbnet: Option<&VerbNetCorpus>, docs: Option<&ReferenceDocs>) -> Vec<String> {
    let mut features = BTreeSet::new();
    if let Some(verbnet) = verbnet {
        for class in verbnet.classes.values() {
            class.visit(&mut |class| {
                for frame in &class.frames {
                    for predicate in &frame.semantics {
                        if !predicate.value.is_empty() {
                            features.insert(predicate.value.clone());
                        }
                    }
                }
            });
        }
    }
    if let Some(docs) = docs {
        features.extend(docs.verb_specific.keys().filter(|k| !k.is_empty()).cloned());
    }
    features.into_iter().collect()
}

pub fn syntactic_restrictions(verbnet: &VerbNetCorpus) -> Vec<String> {
    let mut labels = BTreeSet::new();
    for class in verbnet.classes.values() {
        class.visit(&mut |class| {
            for frame in &class.frames {
                for element in &frame.syntax {
                    element.synrestrs.collect_labels(&mut labels);
                }
            }
        });
    }
    labels.into_iter().collect()
}

pub fn selectional_restrictions(verbnet: &VerbNetCorpus) -> Vec<String> {
    let mut labels = BTreeSet::new();
    for class in verbnet.classes.values() {
        class.visit(&mut |class| {
            for role in &class.themroles {
                role.selrestrs.collect_labels(&mut labels);
            }
        });
    }
    labels.into_iter().collect()
}
