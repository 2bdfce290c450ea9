//! WordNet reader.
//!
//! Reads the `data.<pos>`, `index.<pos>` and `<pos>.exc` files of a WordNet
//! database directory. Faults are handled at line granularity: a malformed
//! line is logged at debug level, counted in `malformed_lines` and skipped,
//! and the rest of the file is still used. Only an unreadable or oversized
//! file counts as an error file.

pub mod grammar;

use std::collections::BTreeMap;
use std::path::Path;
use verbgraph_core::files::{file_name, list_files, read_capped};
use verbgraph_core::{
    parse_files, FileTally, IndexEntry, ParseError, ReadError, ReadOutcome, ReaderOptions,
    Synset, WordNetCorpus,
};

/// Part-of-speech file suffixes, in the order WordNet ships them.
pub const POS_NAMES: [&str; 4] = ["noun", "verb", "adj", "adv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Data(&'static str),
    Index(&'static str),
    Exceptions(&'static str),
}

/// Classify a WordNet file by name; `None` for files the reader ignores
/// (`index.sense`, `lexnames`, `cntlist`, ...).
pub fn file_role(name: &str) -> Option<FileRole> {
    POS_NAMES.into_iter().find_map(|pos| {
        if name == format!("data.{pos}") {
            Some(FileRole::Data(pos))
        } else if name == format!("index.{pos}") {
            Some(FileRole::Index(pos))
        } else if name == format!("{pos}.exc") {
            Some(FileRole::Exceptions(pos))
        } else {
            None
        }
    })
}

enum Parsed {
    Data(Vec<Synset>),
    Index(Vec<IndexEntry>),
    Exceptions(Vec<(String, Vec<String>)>),
}

struct ParsedFile {
    role: FileRole,
    records: Parsed,
    malformed: usize,
}

/// Run `parse` over every non-header line, collecting successes and counting failures.
fn parse_lines<T, E: std::fmt::Display>(
    path: &Path,
    text: &str,
    skip_headers: bool,
    parse: impl Fn(&str) -> Result<T, E>,
) -> (Vec<T>, usize) {
    let mut records = Vec::new();
    let mut malformed = 0;
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() || (skip_headers && grammar::is_header_line(line)) {
            continue;
        }
        match parse(line) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::debug!(path = %path.display(), line = number + 1, error = %err, "skipping malformed WordNet line");
                malformed += 1;
            }
        }
    }
    (records, malformed)
}

fn parse_file(path: &Path, role: FileRole, max_bytes: u64) -> Result<ParsedFile, ParseError> {
    let text = read_capped(path, max_bytes)?;
    let (records, malformed) = match role {
        FileRole::Data(_) => {
            let (records, bad) = parse_lines(path, &text, true, grammar::parse_synset_line);
            (Parsed::Data(records), bad)
        }
        FileRole::Index(_) => {
            let (records, bad) = parse_lines(path, &text, true, grammar::parse_index_line);
            (Parsed::Index(records), bad)
        }
        FileRole::Exceptions(_) => {
            let (records, bad) = parse_lines(path, &text, false, grammar::parse_exception_line);
            (Parsed::Exceptions(records), bad)
        }
    };
    Ok(ParsedFile {
        role,
        records,
        malformed,
    })
}

pub fn read(dir: &Path, options: &ReaderOptions) -> Result<ReadOutcome<WordNetCorpus>, ReadError> {
    let files = list_files(dir, |p| file_role(&file_name(p)).is_some())?;

    let results = parse_files(&files, options.workers, |path| {
        // listed files always classify
        let role = file_role(&file_name(path))
            .ok_or_else(|| ParseError::invalid(path, "not a WordNet database file"))?;
        parse_file(path, role, options.max_file_bytes)
    });

    let mut corpus = WordNetCorpus::default();
    let mut tally = FileTally::default();
    let mut malformed_lines = 0usize;
    let mut duplicate_offsets = 0usize;

    for (path, result) in results {
        let parsed = match result {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping WordNet file");
                tally.failed();
                continue;
            }
        };
        tally.parsed();
        malformed_lines += parsed.malformed;

        match (parsed.role, parsed.records) {
            (FileRole::Data(pos), Parsed::Data(synsets)) => {
                let by_offset = corpus.synsets.entry(pos.to_string()).or_default();
                for synset in synsets {
                    if by_offset.contains_key(&synset.offset) {
                        tracing::debug!(pos, offset = %synset.offset, "duplicate synset offset, keeping first");
                        duplicate_offsets += 1;
                        continue;
                    }
                    by_offset.insert(synset.offset.clone(), synset);
                }
            }
            (FileRole::Index(pos), Parsed::Index(entries)) => {
                let by_lemma = corpus.index.entry(pos.to_string()).or_default();
                for entry in entries {
                    by_lemma.entry(entry.lemma.clone()).or_insert(entry);
                }
            }
            (FileRole::Exceptions(pos), Parsed::Exceptions(rows)) => {
                let forms = corpus.exceptions.entry(pos.to_string()).or_default();
                for (form, bases) in rows {
                    let known = forms.entry(form).or_default();
                    for base in bases {
                        if !known.contains(&base) {
                            known.push(base);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let extra = [
        ("total_synsets", count_nested(&corpus.synsets)),
        ("total_index_entries", count_nested(&corpus.index)),
        ("total_exceptions", count_nested(&corpus.exceptions)),
        ("malformed_lines", malformed_lines),
        ("duplicate_offsets", duplicate_offsets),
    ];
    tracing::info!(
        corpus = "wordnet",
        synsets = extra[0].1,
        malformed_lines,
        errors = tally.errors,
        "WordNet loaded"
    );
    Ok(tally.finish(corpus, extra))
}

fn count_nested<V>(map: &BTreeMap<String, BTreeMap<String, V>>) -> usize {
    map.values().map(BTreeMap::len).sum()
}
