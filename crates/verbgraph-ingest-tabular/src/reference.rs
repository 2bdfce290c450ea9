//! VerbNet reference documentation: predicate and thematic-role definitions
//! (JSON) and the constant / predicate tables (TSV).

use crate::delimited::parse_table;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use verbgraph_core::files::{file_name, list_files, read_capped};
use verbgraph_core::{
    parse_files, FileTally, ParseError, PredicateDefinition, ReadError, ReadOutcome,
    ReaderOptions, ReferenceDocs, TableRow, ThemroleDefinition,
};

pub const PREDICATES_FILE: &str = "pred_calc_for_website_final.json";
pub const THEMROLES_FILE: &str = "themrole_defs.json";
pub const CONSTANTS_FILE: &str = "vn_constants.tsv";
pub const SEMANTIC_PREDICATES_FILE: &str = "vn_semantic_predicates.tsv";
pub const VERB_SPECIFIC_FILE: &str = "vn_verb_specific_predicates.tsv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefFile {
    Predicates,
    Themroles,
    Constants,
    SemanticPredicates,
    VerbSpecific,
}

impl RefFile {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            PREDICATES_FILE => Some(RefFile::Predicates),
            THEMROLES_FILE => Some(RefFile::Themroles),
            CONSTANTS_FILE => Some(RefFile::Constants),
            SEMANTIC_PREDICATES_FILE => Some(RefFile::SemanticPredicates),
            VERB_SPECIFIC_FILE => Some(RefFile::VerbSpecific),
            _ => None,
        }
    }

    /// Column holding the row key in TSV files.
    fn key_column(self) -> &'static str {
        match self {
            RefFile::Constants => "constant",
            _ => "predicate",
        }
    }
}

#[derive(Debug)]
pub enum RefContent {
    Predicates(BTreeMap<String, PredicateDefinition>),
    Themroles(BTreeMap<String, ThemroleDefinition>),
    Table(BTreeMap<String, TableRow>),
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Example lists may be JSON arrays or one string separated by `;` or `|`.
pub fn examples_of(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split([';', '|'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn rest(obj: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    obj.iter()
        .filter(|(k, _)| !known.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Named JSON entries: an object keyed by name, or an array of objects that
/// carry one of `name_keys`.
fn named_entries<'a>(root: &'a Value, name_keys: &[&str]) -> Option<Vec<(String, &'a Value)>> {
    match root {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| {
                    let obj = item.as_object()?;
                    let name = name_keys
                        .iter()
                        .map(|k| string_field(obj, k))
                        .find(|n| !n.is_empty())?;
                    Some((name, item))
                })
                .collect(),
        ),
        _ => None,
    }
}

const PREDICATE_KEYS: [&str; 8] = [
    "name",
    "predicate",
    "definition",
    "description",
    "arguments",
    "examples",
    "category",
    "usage",
];

pub fn predicate_definitions(root: &Value, path: &Path) -> Result<BTreeMap<String, PredicateDefinition>, ParseError> {
    let entries = named_entries(root, &["name", "predicate"])
        .ok_or_else(|| ParseError::invalid(path, "predicate definitions must be an object or array"))?;
    let mut out = BTreeMap::new();
    for (name, info) in entries {
        let definition = match info {
            Value::Object(obj) => PredicateDefinition {
                name: name.clone(),
                definition: string_field(obj, "definition"),
                description: string_field(obj, "description"),
                usage: string_field(obj, "usage"),
                arguments: obj
                    .get("arguments")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
                examples: examples_of(obj.get("examples")),
                category: string_field(obj, "category"),
                attributes: rest(obj, &PREDICATE_KEYS),
            },
            other => PredicateDefinition {
                name: name.clone(),
                definition: match other {
                    Value::String(s) => s.clone(),
                    v => v.to_string(),
                },
                ..PredicateDefinition::default()
            },
        };
        out.entry(name).or_insert(definition);
    }
    Ok(out)
}

const THEMROLE_KEYS: [&str; 6] = [
    "name",
    "role",
    "definition",
    "description",
    "examples",
    "selectional_restrictions",
];

pub fn themrole_definitions(root: &Value, path: &Path) -> Result<BTreeMap<String, ThemroleDefinition>, ParseError> {
    let entries = named_entries(root, &["name", "role"])
        .ok_or_else(|| ParseError::invalid(path, "thematic role definitions must be an object or array"))?;
    let mut out = BTreeMap::new();
    for (name, info) in entries {
        let definition = match info {
            Value::Object(obj) => ThemroleDefinition {
                name: name.clone(),
                definition: string_field(obj, "definition"),
                description: string_field(obj, "description"),
                examples: examples_of(obj.get("examples")),
                selectional_restrictions: examples_of(obj.get("selectional_restrictions")),
                attributes: rest(obj, &THEMROLE_KEYS),
            },
            other => ThemroleDefinition {
                name: name.clone(),
                definition: match other {
                    Value::String(s) => s.clone(),
                    v => v.to_string(),
                },
                ..ThemroleDefinition::default()
            },
        };
        out.entry(name).or_insert(definition);
    }
    Ok(out)
}

/// TSV rows keyed by `key_column`, or by the first column when it is absent.
pub fn keyed_rows(text: &str, key_column: &str, path: &Path) -> Result<BTreeMap<String, TableRow>, ParseError> {
    let table = parse_table(text, Some('\t')).ok_or_else(|| ParseError::invalid(path, "empty table"))?;
    let key = if table.has_column(key_column) {
        key_column.to_string()
    } else {
        table
            .headers
            .first()
            .filter(|h| !h.is_empty())
            .cloned()
            .ok_or_else(|| ParseError::invalid(path, "table has no key column"))?
    };

    let mut rows = BTreeMap::new();
    for row in table.rows {
        let Some(id) = row.get(&key).filter(|v| !v.is_empty()).cloned() else {
            continue;
        };
        rows.entry(id).or_insert(row);
    }
    Ok(rows)
}

pub fn parse_reference_file(path: &Path, kind: RefFile, max_bytes: u64) -> Result<RefContent, ParseError> {
    let text = read_capped(path, max_bytes)?;
    let json = || -> Result<Value, ParseError> {
        serde_json::from_str(&text).map_err(|source| ParseError::Json {
            path: path.to_path_buf(),
            source,
        })
    };
    match kind {
        RefFile::Predicates => Ok(RefContent::Predicates(predicate_definitions(&json()?, path)?)),
        RefFile::Themroles => Ok(RefContent::Themroles(themrole_definitions(&json()?, path)?)),
        RefFile::Constants | RefFile::SemanticPredicates | RefFile::VerbSpecific => {
            Ok(RefContent::Table(keyed_rows(&text, kind.key_column(), path)?))
        }
    }
}

pub fn read(dir: &Path, options: &ReaderOptions) -> Result<ReadOutcome<ReferenceDocs>, ReadError> {
    let files = list_files(dir, |p| RefFile::from_name(&file_name(p)).is_some())?;

    let results = parse_files(&files, options.workers, |path| {
        let kind = RefFile::from_name(&file_name(path))
            .ok_or_else(|| ParseError::invalid(path, "not a reference document"))?;
        parse_reference_file(path, kind, options.max_file_bytes).map(|content| (kind, content))
    });

    let mut docs = ReferenceDocs::default();
    let mut tally = FileTally::default();
    for (path, result) in results {
        match result {
            Ok((kind, content)) => {
                tally.parsed();
                match (kind, content) {
                    (_, RefContent::Predicates(p)) => docs.predicates = p,
                    (_, RefContent::Themroles(t)) => docs.themroles = t,
                    (RefFile::Constants, RefContent::Table(rows)) => docs.constants = rows,
                    (RefFile::SemanticPredicates, RefContent::Table(rows)) => {
                        docs.semantic_predicates = rows
                    }
                    (_, RefContent::Table(rows)) => docs.verb_specific = rows,
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping reference document");
                tally.failed();
            }
        }
    }

    let extra = [
        ("total_predicates", docs.predicates.len()),
        ("total_themroles", docs.themroles.len()),
        ("total_constants", docs.constants.len()),
        ("total_semantic_predicates", docs.semantic_predicates.len()),
        ("total_verb_specific", docs.verb_specific.len()),
    ];
    tracing::info!(
        corpus = "reference_docs",
        predicates = docs.predicates.len(),
        themroles = docs.themroles.len(),
        errors = tally.errors,
        "reference docs loaded"
    );
    Ok(tally.finish(docs, extra))
}
