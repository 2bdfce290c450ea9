use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordNetCorpus {
    /// POS (`noun`, `verb`, ...) -> offset -> synset.
    pub synsets: BTreeMap<String, BTreeMap<String, Synset>>,
    /// POS -> lemma -> index entry.
    pub index: BTreeMap<String, BTreeMap<String, IndexEntry>>,
    /// POS -> inflected form -> base forms.
    pub exceptions: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Synset {
    pub offset: String,
    pub lex_filenum: u8,
    pub ss_type: String,
    pub words: Vec<SynsetWord>,
    pub pointers: Vec<Pointer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<VerbFrameRef>,
    pub gloss: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynsetWord {
    pub word: String,
    pub lex_id: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    pub symbol: String,
    pub relation: String,
    pub target_offset: String,
    pub pos: String,
    /// Four hex digits: source word number, target word number (`0000` = whole synset).
    pub source_target: String,
}

/// A generic verb frame applicable to one word (or all words when `word_number == 0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbFrameRef {
    pub frame_number: u16,
    pub word_number: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub lemma: String,
    pub pos: String,
    pub synset_count: usize,
    pub pointer_symbols: Vec<String>,
    pub sense_count: usize,
    pub tagsense_count: usize,
    pub synset_offsets: Vec<String>,
}

/// Map a WordNet pointer symbol to a readable relation name.
pub fn pointer_relation(symbol: &str) -> &'static str {
    match symbol {
        "!" => "antonym",
        "@" => "hypernym",
        "@i" => "instance_hypernym",
        "~" => "hyponym",
        "~i" => "instance_hyponym",
        "#m" => "member_holonym",
        "#s" => "substance_holonym",
        "#p" => "part_holonym",
        "%m" => "member_meronym",
        "%s" => "substance_meronym",
        "%p" => "part_meronym",
        "=" => "attribute",
        "+" => "derivationally_related",
        ";c" => "domain_topic",
        ";r" => "domain_region",
        ";u" => "domain_usage",
        "-c" => "member_topic",
        "-r" => "member_region",
        "-u" => "member_usage",
        "*" => "entailment",
        ">" => "cause",
        "^" => "also_see",
        "$" => "verb_group",
        "&" => "similar_to",
        "<" => "participle",
        "\\" => "pertainym",
        _ => "unknown",
    }
}
