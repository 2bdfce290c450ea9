//! Corpus kinds and their accepted directory names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the lexical resources the pipeline knows how to ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CorpusKind {
    #[serde(rename = "verbnet")]
    VerbNet,
    #[serde(rename = "framenet")]
    FrameNet,
    #[serde(rename = "propbank")]
    PropBank,
    #[serde(rename = "ontonotes")]
    OntoNotes,
    #[serde(rename = "wordnet")]
    WordNet,
    #[serde(rename = "bso")]
    Bso,
    #[serde(rename = "semnet")]
    SemNet,
    #[serde(rename = "reference_docs")]
    ReferenceDocs,
}

impl CorpusKind {
    /// Every kind, in load order.
    pub const ALL: [CorpusKind; 8] = [
        CorpusKind::VerbNet,
        CorpusKind::FrameNet,
        CorpusKind::PropBank,
        CorpusKind::OntoNotes,
        CorpusKind::WordNet,
        CorpusKind::Bso,
        CorpusKind::SemNet,
        CorpusKind::ReferenceDocs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CorpusKind::VerbNet => "verbnet",
            CorpusKind::FrameNet => "framenet",
            CorpusKind::PropBank => "propbank",
            CorpusKind::OntoNotes => "ontonotes",
            CorpusKind::WordNet => "wordnet",
            CorpusKind::Bso => "bso",
            CorpusKind::SemNet => "semnet",
            CorpusKind::ReferenceDocs => "reference_docs",
        }
    }

    /// Directory names tried (in order) under the corpora root.
    pub fn default_aliases(self) -> &'static [&'static str] {
        match self {
            CorpusKind::VerbNet => &["verbnet", "vn", "verbnet3.4"],
            CorpusKind::FrameNet => &["framenet", "fn", "framenet1.7"],
            CorpusKind::PropBank => &["propbank", "pb", "propbank3.4"],
            CorpusKind::OntoNotes => &["ontonotes", "on", "ontonotes5.0"],
            CorpusKind::WordNet => &["wordnet", "wn", "wordnet3.1"],
            CorpusKind::Bso => &["BSO", "bso", "basic_semantic_ontology"],
            CorpusKind::SemNet => &["semnet20180205", "semnet", "semantic_network"],
            CorpusKind::ReferenceDocs => &["reference_docs", "ref_docs", "docs"],
        }
    }
}

impl fmt::Display for CorpusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown corpus `{0}`")]
pub struct UnknownCorpusKind(pub String);

impl FromStr for CorpusKind {
    type Err = UnknownCorpusKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        CorpusKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| UnknownCorpusKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in CorpusKind::ALL {
            assert_eq!(kind.as_str().parse::<CorpusKind>(), Ok(kind));
        }
        assert_eq!("VerbNet".parse::<CorpusKind>(), Ok(CorpusKind::VerbNet));
        assert!("vn_api".parse::<CorpusKind>().is_err());
    }

    #[test]
    fn serde_names_match_display() {
        let json = serde_json::to_string(&CorpusKind::ReferenceDocs).unwrap();
        assert_eq!(json, "\"reference_docs\"");
    }
}
