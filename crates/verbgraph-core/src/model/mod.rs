//! Normalized in-memory model of every supported lexical resource.
//!
//! Each corpus has its own tree type; [`CorpusTree`] is the closed sum over
//! them. All types are plain data (serde both ways) so that downstream layers
//! can consume either the typed tree or its JSON projection.

mod bso;
mod framenet;
mod ontonotes;
mod propbank;
mod reference;
mod semnet;
mod verbnet;
mod wordnet;

pub use bso::*;
pub use framenet::*;
pub use ontonotes::*;
pub use propbank::*;
pub use reference::*;
pub use semnet::*;
pub use verbnet::*;
pub use wordnet::*;

use crate::kind::CorpusKind;
use serde::{Deserialize, Serialize};

/// A typed link from an entity in one corpus to an entity in another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossReference {
    pub target_corpus: CorpusKind,
    pub target_id: String,
    pub confidence: f32,
}

impl CrossReference {
    /// A reference asserted directly by the source file.
    pub fn declared(target_corpus: CorpusKind, target_id: impl Into<String>) -> Self {
        Self {
            target_corpus,
            target_id: target_id.into(),
            confidence: 1.0,
        }
    }

    /// A reference carrying a source-supplied confidence, clamped to `0.0..=1.0`.
    pub fn with_confidence(target_corpus: CorpusKind, target_id: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_finite() { confidence.clamp(0.0, 1.0) } else { 1.0 };
        Self {
            target_corpus,
            target_id: target_id.into(),
            confidence,
        }
    }
}

/// The normalized tree of one loaded corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "corpus", content = "tree", rename_all = "snake_case")]
pub enum CorpusTree {
    VerbNet(VerbNetCorpus),
    FrameNet(FrameNetCorpus),
    PropBank(PropBankCorpus),
    OntoNotes(OntoNotesCorpus),
    WordNet(WordNetCorpus),
    Bso(BsoMapping),
    SemNet(SemNetCorpus),
    ReferenceDocs(ReferenceDocs),
}

impl CorpusTree {
    pub fn kind(&self) -> CorpusKind {
        match self {
            CorpusTree::VerbNet(_) => CorpusKind::VerbNet,
            CorpusTree::FrameNet(_) => CorpusKind::FrameNet,
            CorpusTree::PropBank(_) => CorpusKind::PropBank,
            CorpusTree::OntoNotes(_) => CorpusKind::OntoNotes,
            CorpusTree::WordNet(_) => CorpusKind::WordNet,
            CorpusTree::Bso(_) => CorpusKind::Bso,
            CorpusTree::SemNet(_) => CorpusKind::SemNet,
            CorpusTree::ReferenceDocs(_) => CorpusKind::ReferenceDocs,
        }
    }

    /// JSON projection of the bare tree (no `corpus` tag).
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            CorpusTree::VerbNet(t) => serde_json::to_value(t),
            CorpusTree::FrameNet(t) => serde_json::to_value(t),
            CorpusTree::PropBank(t) => serde_json::to_value(t),
            CorpusTree::OntoNotes(t) => serde_json::to_value(t),
            CorpusTree::WordNet(t) => serde_json::to_value(t),
            CorpusTree::Bso(t) => serde_json::to_value(t),
            CorpusTree::SemNet(t) => serde_json::to_value(t),
            CorpusTree::ReferenceDocs(t) => serde_json::to_value(t),
        }
    }

    pub fn as_verbnet(&self) -> Option<&VerbNetCorpus> {
        match self {
            CorpusTree::VerbNet(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_verbnet_mut(&mut self) -> Option<&mut VerbNetCorpus> {
        match self {
            CorpusTree::VerbNet(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_framenet(&self) -> Option<&FrameNetCorpus> {
        match self {
            CorpusTree::FrameNet(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_propbank(&self) -> Option<&PropBankCorpus> {
        match self {
            CorpusTree::PropBank(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_bso(&self) -> Option<&BsoMapping> {
        match self {
            CorpusTree::Bso(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_reference_docs(&self) -> Option<&ReferenceDocs> {
        match self {
            CorpusTree::ReferenceDocs(t) => Some(t),
            _ => None,
        }
    }
}
