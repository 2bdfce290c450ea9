use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One TSV row, column name -> trimmed cell.
pub type TableRow = BTreeMap<String, String>;

/// Predicate/role definitions and constant tables shipped with VerbNet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDocs {
    pub predicates: BTreeMap<String, PredicateDefinition>,
    pub themroles: BTreeMap<String, ThemroleDefinition>,
    pub constants: BTreeMap<String, TableRow>,
    pub semantic_predicates: BTreeMap<String, TableRow>,
    pub verb_specific: BTreeMap<String, TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredicateDefinition {
    pub name: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Call pattern, e.g. `cause(E, X)`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub usage: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemroleDefinition {
    pub name: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectional_restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}
