use crate::kind::CorpusKind;
use crate::model::CrossReference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OntoNotesCorpus {
    /// Sense inventories keyed by lemma.
    pub sense_inventories: BTreeMap<String, SenseInventory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenseInventory {
    pub lemma: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub commentary: String,
    pub senses: Vec<Sense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    pub number: String,
    pub name: String,
    pub group: String,
    pub commentary: String,
    pub examples: Vec<String>,
    /// Cross-corpus links grouped by the corpus they point into.
    pub mappings: BTreeMap<CorpusKind, Vec<CrossReference>>,
    /// Mapping entries with no corpus of their own (`gr_sense`, `omega`, ...), keyed by tag.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other_mappings: BTreeMap<String, Vec<String>>,
}
