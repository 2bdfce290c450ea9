//! OntoNotes sense-inventory reader.

use crate::dom::{self, Element};
use crate::is_xml;
use std::collections::BTreeMap;
use std::path::Path;
use verbgraph_core::files::{file_name, file_stem, walk_files};
use verbgraph_core::{
    parse_files, CorpusKind, CrossReference, FileTally, OntoNotesCorpus, ParseError, ReadError,
    ReadOutcome, ReaderOptions, Sense, SenseInventory,
};

pub fn read(dir: &Path, options: &ReaderOptions) -> Result<ReadOutcome<OntoNotesCorpus>, ReadError> {
    let files = walk_files(dir, is_xml)?;
    let results = parse_files(&files, options.workers, |path| {
        parse_inventory_file(path, options.max_file_bytes)
    });

    let mut corpus = OntoNotesCorpus::default();
    let mut tally = FileTally::default();
    for (path, result) in results {
        match result {
            Ok(inventory) if corpus.sense_inventories.contains_key(&inventory.lemma) => {
                tracing::warn!(path = %path.display(), lemma = %inventory.lemma, "duplicate sense inventory, keeping first");
                tally.failed();
            }
            Ok(inventory) => {
                corpus
                    .sense_inventories
                    .insert(inventory.lemma.clone(), inventory);
                tally.parsed();
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping OntoNotes inventory");
                tally.failed();
            }
        }
    }

    let senses: Vec<&Sense> = corpus
        .sense_inventories
        .values()
        .flat_map(|inv| inv.senses.iter())
        .collect();
    let mappings: usize = senses
        .iter()
        .flat_map(|s| s.mappings.values())
        .map(Vec::len)
        .sum();
    let extra = [
        ("total_inventories", corpus.sense_inventories.len()),
        ("total_senses", senses.len()),
        ("total_mappings", mappings),
    ];
    tracing::info!(
        corpus = "ontonotes",
        inventories = corpus.sense_inventories.len(),
        errors = tally.errors,
        "OntoNotes loaded"
    );
    Ok(tally.finish(corpus, extra))
}

pub fn parse_inventory_file(path: &Path, max_bytes: u64) -> Result<SenseInventory, ParseError> {
    let root = dom::parse_file(path, max_bytes)?;
    dom::expect_root(&root, "inventory", path)?;

    let lemma = match root.attr("lemma").map(str::trim) {
        Some(lemma) if !lemma.is_empty() => lemma.to_string(),
        _ => file_stem(path),
    };

    Ok(SenseInventory {
        lemma,
        commentary: root.child_text("commentary"),
        senses: root.children_named("sense").map(parse_sense).collect(),
        source_file: Some(file_name(path)),
    })
}

/// Target corpus for a `mappings` child or a `mapping type=...`.
fn mapping_kind(tag: &str) -> Option<CorpusKind> {
    match tag.to_ascii_lowercase().as_str() {
        "wn" | "wordnet" => Some(CorpusKind::WordNet),
        "pb" | "propbank" => Some(CorpusKind::PropBank),
        "vn" | "verbnet" => Some(CorpusKind::VerbNet),
        "fn" | "framenet" => Some(CorpusKind::FrameNet),
        _ => None,
    }
}

fn mapping_ids(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn add_mapping(
    mappings: &mut BTreeMap<CorpusKind, Vec<CrossReference>>,
    kind: CorpusKind,
    raw: &str,
) {
    for id in mapping_ids(raw) {
        let refs = mappings.entry(kind).or_default();
        if !refs.iter().any(|r| r.target_id == id) {
            refs.push(CrossReference::declared(kind, id));
        }
    }
}

fn add_other_mapping(other: &mut BTreeMap<String, Vec<String>>, tag: &str, raw: &str) {
    let tag = tag.trim().to_ascii_lowercase();
    if tag.is_empty() {
        return;
    }
    for id in mapping_ids(raw) {
        let values = other.entry(tag.clone()).or_default();
        if !values.iter().any(|v| v == id) {
            values.push(id.to_string());
        }
    }
}

fn parse_sense(el: &Element) -> Sense {
    let mut mappings = BTreeMap::new();
    let mut other_mappings = BTreeMap::new();
    for block in el.children_named("mappings") {
        for child in &block.children {
            let (tag, raw) = if child.name == "mapping" {
                (child.attr("type").unwrap_or_default(), child.attr_or_empty("value"))
            } else {
                (child.name.as_str(), child.deep_text())
            };
            match mapping_kind(tag) {
                Some(kind) => add_mapping(&mut mappings, kind, &raw),
                None => {
                    tracing::debug!(tag, "keeping non-corpus sense mapping");
                    add_other_mapping(&mut other_mappings, tag, &raw);
                }
            }
        }
    }

    let mut examples: Vec<String> = Vec::new();
    for block in el.children_named("examples") {
        examples.extend(
            block
                .text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
        for example in block.children_named("example") {
            let text = match example.child("text") {
                Some(t) => t.deep_text(),
                None => example.deep_text(),
            };
            if !text.is_empty() {
                examples.push(text);
            }
        }
    }

    Sense {
        number: el.attr_or_empty("n"),
        name: el.attr_or_empty("name"),
        group: el.attr_or_empty("group"),
        commentary: el.child_text("commentary"),
        examples,
        mappings,
        other_mappings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_senses_and_typed_mappings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("give-v.xml");
        std::fs::write(
            &path,
            r#"<?xml version="1.0"?>
<inventory lemma="give-v">
  <commentary>Transfer senses.</commentary>
  <sense n="1" group="1" name="transfer possession">
    <commentary>The core sense.</commentary>
    <examples>
      John gave Mary a book.
      She gave him the keys.
    </examples>
    <mappings>
      <gr_sense>1</gr_sense>
      <wn version="3.0">1,2 4</wn>
      <omega>give-1</omega>
      <pb>give.01</pb>
      <mapping type="VN" value="give-13.1"/>
    </mappings>
  </sense>
  <sense n="2" group="1" name="emit"><mappings><wn/></mappings></sense>
</inventory>"#,
        )
        .unwrap();

        let inventory = parse_inventory_file(&path, 1 << 20).unwrap();
        assert_eq!(inventory.lemma, "give-v");
        assert_eq!(inventory.commentary, "Transfer senses.");
        assert_eq!(inventory.senses.len(), 2);

        let first = &inventory.senses[0];
        assert_eq!(first.examples.len(), 2);
        assert_eq!(first.examples[1], "She gave him the keys.");
        let wn: Vec<&str> = first.mappings[&CorpusKind::WordNet]
            .iter()
            .map(|r| r.target_id.as_str())
            .collect();
        assert_eq!(wn, vec!["1", "2", "4"]);
        assert_eq!(first.mappings[&CorpusKind::PropBank][0].target_id, "give.01");
        assert_eq!(first.mappings[&CorpusKind::VerbNet][0].target_id, "give-13.1");
        assert!(!first.mappings.contains_key(&CorpusKind::FrameNet));
        assert!(inventory.senses[1].mappings.is_empty());
        assert!(inventory.senses[1].other_mappings.is_empty());
    }

    #[test]
    fn non_corpus_mappings_are_kept_by_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run-v.xml");
        std::fs::write(
            &path,
            r#"<inventory lemma="run-v">
  <sense n="1" group="1" name="move fast">
    <mappings>
      <gr_sense>1</gr_sense>
      <omega>run-1, run-3</omega>
      <ON>r1</ON>
      <mapping type="omega" value="run-3 run-4"/>
      <mapping type="VN" value="run-51.3.2"/>
      <wn/>
    </mappings>
  </sense>
</inventory>"#,
        )
        .unwrap();

        let sense = &parse_inventory_file(&path, 1 << 20).unwrap().senses[0];
        assert_eq!(sense.other_mappings["gr_sense"], vec!["1"]);
        assert_eq!(sense.other_mappings["omega"], vec!["run-1", "run-3", "run-4"]);
        assert_eq!(sense.other_mappings["on"], vec!["r1"]);
        assert_eq!(sense.other_mappings.len(), 3);
        assert_eq!(sense.mappings[&CorpusKind::VerbNet][0].target_id, "run-51.3.2");
        assert!(!sense.mappings.contains_key(&CorpusKind::WordNet));

        let value = serde_json::to_value(sense).unwrap();
        assert_eq!(value["other_mappings"]["omega"][0], "run-1");
    }

    #[test]
    fn wrong_root_counts_as_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.xml"), r#"<inventory lemma="a"/>"#).unwrap();
        std::fs::write(dir.path().join("b.xml"), "<html><body/></html>").unwrap();

        let outcome = read(dir.path(), &ReaderOptions::default()).unwrap();
        assert_eq!(outcome.statistics["parsed_files"], 1);
        assert_eq!(outcome.error_files, 1);
        assert!(outcome.tree.sense_inventories.contains_key("a"));
    }
}
