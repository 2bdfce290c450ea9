use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Verb and noun semantic networks, kept separate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemNetCorpus {
    pub verb_network: BTreeMap<String, SemNetEntry>,
    pub noun_network: BTreeMap<String, SemNetEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemNetEntry {
    pub lemma: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pos: String,
    pub relations: Vec<SemNetRelation>,
    /// Anything else the source carried for this node.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemNetRelation {
    pub relation: String,
    pub target: String,
    pub weight: f64,
}
