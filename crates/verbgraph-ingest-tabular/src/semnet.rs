//! SemNet semantic networks (`verb-semnet.json`, `noun-semnet.json`).
//!
//! Two source shapes are accepted:
//!
//! - a graph: `{"nodes": {..} | [..], "edges" | "relationships": [..]}`
//! - a flat object: `{"lemma": {"relation": ["target", ..], "pos": "v", ..}}`
//!
//! Both normalize into [`SemNetEntry`] values keyed by lemma.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use verbgraph_core::files::read_capped;
use verbgraph_core::{
    parse_files, FileTally, ParseError, ReadError, ReadOutcome, ReaderOptions, SemNetCorpus,
    SemNetEntry, SemNetRelation,
};

pub const VERB_FILE: &str = "verb-semnet.json";
pub const NOUN_FILE: &str = "noun-semnet.json";

type Network = BTreeMap<String, SemNetEntry>;

const NODE_KEYS: [&str; 5] = ["id", "word", "lemma", "pos", "relations"];

fn weight_of(value: &Map<String, Value>) -> f64 {
    value.get("weight").and_then(Value::as_f64).unwrap_or(1.0)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `{"relation": ["t1", ..]}` or `[{"relation": .., "target": .., "weight": ..}]`.
fn relations_from(value: &Value) -> Vec<SemNetRelation> {
    let mut relations = Vec::new();
    match value {
        Value::Object(map) => {
            for (relation, targets) in map {
                push_targets(&mut relations, relation, targets);
            }
        }
        Value::Array(items) => {
            for item in items {
                let Some(obj) = item.as_object() else { continue };
                let relation = ["relation", "type", "label"]
                    .iter()
                    .find_map(|k| obj.get(*k).and_then(text))
                    .unwrap_or_else(|| "related".to_string());
                if let Some(target) = obj.get("target").and_then(text) {
                    relations.push(SemNetRelation {
                        relation,
                        target,
                        weight: weight_of(obj),
                    });
                }
            }
        }
        _ => {}
    }
    relations
}

fn push_targets(out: &mut Vec<SemNetRelation>, relation: &str, targets: &Value) {
    match targets {
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(obj) => {
                        if let Some(target) = obj.get("target").or_else(|| obj.get("word")).and_then(text) {
                            out.push(SemNetRelation {
                                relation: relation.to_string(),
                                target,
                                weight: weight_of(obj),
                            });
                        }
                    }
                    other => {
                        if let Some(target) = text(other) {
                            out.push(SemNetRelation {
                                relation: relation.to_string(),
                                target,
                                weight: 1.0,
                            });
                        }
                    }
                }
            }
        }
        other => {
            if let Some(target) = text(other) {
                out.push(SemNetRelation {
                    relation: relation.to_string(),
                    target,
                    weight: 1.0,
                });
            }
        }
    }
}

fn graph_node(key: &str, info: &Value) -> SemNetEntry {
    let Some(obj) = info.as_object() else {
        return SemNetEntry {
            lemma: key.to_string(),
            ..SemNetEntry::default()
        };
    };
    let lemma = ["word", "lemma"]
        .iter()
        .find_map(|k| obj.get(*k).and_then(text))
        .unwrap_or_else(|| key.to_string());
    SemNetEntry {
        lemma,
        pos: obj.get("pos").and_then(text).unwrap_or_default(),
        relations: obj.get("relations").map(relations_from).unwrap_or_default(),
        attributes: obj
            .iter()
            .filter(|(k, _)| !NODE_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    }
}

fn from_graph(root: &Map<String, Value>) -> Network {
    let mut network = Network::new();
    let mut ids: BTreeMap<String, String> = BTreeMap::new();

    match root.get("nodes") {
        Some(Value::Object(nodes)) => {
            for (id, info) in nodes {
                let entry = graph_node(id, info);
                ids.insert(id.clone(), entry.lemma.clone());
                network.entry(entry.lemma.clone()).or_insert(entry);
            }
        }
        Some(Value::Array(nodes)) => {
            for (i, info) in nodes.iter().enumerate() {
                let id = info
                    .as_object()
                    .and_then(|o| o.get("id").or_else(|| o.get("word")))
                    .and_then(text)
                    .unwrap_or_else(|| i.to_string());
                let entry = graph_node(&id, info);
                ids.insert(id, entry.lemma.clone());
                network.entry(entry.lemma.clone()).or_insert(entry);
            }
        }
        _ => {}
    }

    let edges = root.get("edges").or_else(|| root.get("relationships"));
    if let Some(Value::Array(edges)) = edges {
        for edge in edges {
            let Some(obj) = edge.as_object() else { continue };
            let (Some(source), Some(target)) = (
                obj.get("source").and_then(text),
                obj.get("target").and_then(text),
            ) else {
                continue;
            };
            let resolve = |id: String| ids.get(&id).cloned().unwrap_or(id);
            let source = resolve(source);
            let relation = ["relation", "type", "label"]
                .iter()
                .find_map(|k| obj.get(*k).and_then(text))
                .unwrap_or_else(|| "related".to_string());
            network
                .entry(source.clone())
                .or_insert_with(|| SemNetEntry {
                    lemma: source.clone(),
                    ..SemNetEntry::default()
                })
                .relations
                .push(SemNetRelation {
                    relation,
                    target: resolve(target),
                    weight: weight_of(obj),
                });
        }
    }
    network
}

fn from_flat(root: &Map<String, Value>) -> Network {
    let mut network = Network::new();
    for (lemma, value) in root {
        let mut entry = SemNetEntry {
            lemma: lemma.clone(),
            ..SemNetEntry::default()
        };
        match value {
            Value::Object(obj) => {
                for (key, field) in obj {
                    match (key.as_str(), field) {
                        ("pos", _) => entry.pos = text(field).unwrap_or_default(),
                        ("relations", _) => entry.relations.extend(relations_from(field)),
                        (_, Value::Array(_)) => push_targets(&mut entry.relations, key, field),
                        _ => {
                            entry.attributes.insert(key.clone(), field.clone());
                        }
                    }
                }
            }
            Value::Array(_) => push_targets(&mut entry.relations, "related", value),
            other => {
                entry
                    .attributes
                    .insert("value".to_string(), other.clone());
            }
        }
        network.insert(lemma.clone(), entry);
    }
    network
}

/// Normalize one SemNet document.
pub fn parse_network(root: &Value, path: &Path) -> Result<Network, ParseError> {
    let obj = root
        .as_object()
        .ok_or_else(|| ParseError::invalid(path, "SemNet root is not an object"))?;
    if obj.contains_key("nodes") || obj.contains_key("edges") || obj.contains_key("relationships") {
        Ok(from_graph(obj))
    } else {
        Ok(from_flat(obj))
    }
}

pub fn parse_network_file(path: &Path, max_bytes: u64) -> Result<Network, ParseError> {
    let text = read_capped(path, max_bytes)?;
    let root: Value = serde_json::from_str(&text).map_err(|source| ParseError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    parse_network(&root, path)
}

pub fn read(dir: &Path, options: &ReaderOptions) -> Result<ReadOutcome<SemNetCorpus>, ReadError> {
    if !dir.is_dir() {
        return Err(ReadError::MissingDirectory(dir.to_path_buf()));
    }
    let files: Vec<_> = [VERB_FILE, NOUN_FILE]
        .iter()
        .map(|name| dir.join(name))
        .filter(|p| p.is_file())
        .collect();

    let results = parse_files(&files, options.workers, |path| {
        parse_network_file(path, options.max_file_bytes)
    });

    let mut corpus = SemNetCorpus::default();
    let mut tally = FileTally::default();
    for (path, result) in results {
        match result {
            Ok(network) => {
                tally.parsed();
                if path.ends_with(VERB_FILE) {
                    corpus.verb_network = network;
                } else {
                    corpus.noun_network = network;
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping SemNet file");
                tally.failed();
            }
        }
    }

    let relations: usize = corpus
        .verb_network
        .values()
        .chain(corpus.noun_network.values())
        .map(|e| e.relations.len())
        .sum();
    let extra = [
        ("verb_nodes", corpus.verb_network.len()),
        ("noun_nodes", corpus.noun_network.len()),
        ("total_relations", relations),
    ];
    tracing::info!(
        corpus = "semnet",
        verbs = corpus.verb_network.len(),
        nouns = corpus.noun_network.len(),
        errors = tally.errors,
        "SemNet loaded"
    );
    Ok(tally.finish(corpus, extra))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn graph_shape_resolves_edge_ids() {
        let doc = json!({
            "nodes": [
                {"id": "n1", "word": "give", "pos": "v", "frequency": 12},
                {"id": "n2", "word": "donate", "pos": "v"}
            ],
            "edges": [
                {"source": "n1", "target": "n2", "relation": "synonym", "weight": 0.8},
                {"source": "n2", "target": "n1"}
            ]
        });
        let network = parse_network(&doc, Path::new("verb-semnet.json")).unwrap();
        let give = &network["give"];
        assert_eq!(give.pos, "v");
        assert_eq!(give.attributes["frequency"], json!(12));
        assert_eq!(give.relations[0].target, "donate");
        assert_eq!(give.relations[0].weight, 0.8);
        assert_eq!(network["donate"].relations[0].relation, "related");
    }

    #[test]
    fn flat_shape_reads_relation_lists() {
        let doc = json!({
            "give": {"pos": "v", "hypernym": ["transfer"], "synonym": ["hand", "pass"], "gloss": "x"},
            "take": ["grab"]
        });
        let network = parse_network(&doc, Path::new("verb-semnet.json")).unwrap();
        assert_eq!(network["give"].relations.len(), 3);
        assert_eq!(network["give"].attributes["gloss"], json!("x"));
        assert_eq!(network["take"].relations[0].target, "grab");
        assert!(parse_network(&json!([1, 2]), Path::new("x.json")).is_err());
    }

    #[test]
    fn networks_stay_separate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(VERB_FILE), r#"{"give": {"synonym": ["hand"]}}"#).unwrap();
        std::fs::write(dir.path().join(NOUN_FILE), "{ not json").unwrap();

        let outcome = read(dir.path(), &ReaderOptions::default()).unwrap();
        assert_eq!(outcome.error_files, 1);
        assert_eq!(outcome.tree.verb_network.len(), 1);
        assert!(outcome.tree.noun_network.is_empty());
    }
}
