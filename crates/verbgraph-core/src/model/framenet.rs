use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameNetCorpus {
    /// Frames keyed by frame name.
    pub frames: BTreeMap<String, FrameNetFrame>,
    /// Lexical unit name (`give.v`) -> names of the frames it evokes.
    pub lexical_units: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub frame_index: BTreeMap<String, FrameIndexEntry>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lu_index: BTreeMap<String, LuIndexEntry>,
    pub frame_relations: FrameRelations,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameNetFrame {
    pub name: String,
    pub id: String,
    pub definition: String,
    pub frame_elements: BTreeMap<String, FrameElement>,
    pub lexical_units: BTreeMap<String, LexicalUnit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<FrameRelationRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameElement {
    pub id: String,
    #[serde(rename = "coreType")]
    pub core_type: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalUnit {
    pub id: String,
    pub pos: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lemma_id: String,
    pub definition: String,
}

/// A relation declared inside a frame file (`Inherits from`, `Uses`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRelationRef {
    #[serde(rename = "type")]
    pub relation_type: String,
    pub related_frames: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameIndexEntry {
    pub id: String,
    pub name: String,
    pub cdate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LuIndexEntry {
    pub id: String,
    pub name: String,
    pub pos: String,
    pub frame: String,
}

/// Contents of `frRelation.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRelations {
    pub frame_relations: Vec<FrameRelation>,
    pub fe_relations: Vec<FeRelation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRelation {
    #[serde(rename = "type")]
    pub relation_type: String,
    pub id: String,
    pub sub_frame: String,
    pub super_frame: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeRelation {
    #[serde(rename = "type")]
    pub relation_type: String,
    pub super_fe: String,
    pub sub_fe: String,
    pub frame_relation: String,
}
