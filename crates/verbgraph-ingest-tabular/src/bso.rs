//! BSO (Basic Semantic Ontology) mapping tables.
//!
//! `VNBSOMapping*.csv` rows fill the class -> category direction,
//! `BSOVNMapping*.csv` rows fill category -> classes (with members). The two
//! directions are reconciled after all files are merged.

use crate::delimited::{parse_table, Table};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use verbgraph_core::files::{file_name, has_extension, list_files, read_capped};
use verbgraph_core::{
    parse_files, BsoMapping, FileTally, ParseError, ReadError, ReadOutcome, ReaderOptions,
};

const CLASS_COLUMNS: [&str; 2] = ["VN_Class", "VerbNet_Class"];
const CATEGORY_COLUMNS: [&str; 1] = ["BSO_Category"];
const MEMBER_COLUMNS: [&str; 1] = ["Members"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    VnToBso,
    BsoToVn,
}

pub fn direction(name: &str) -> Option<Direction> {
    if name.contains("VNBSOMapping") {
        Some(Direction::VnToBso)
    } else if name.contains("BSOVNMapping") {
        Some(Direction::BsoToVn)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BsoRow {
    pub class_id: String,
    pub category: String,
    pub members: Vec<String>,
}

fn parenthetical() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"))
}

/// Split a member cell. Parenthetical notes are dropped; `,`/`;` separate
/// members when present, whitespace otherwise.
pub fn split_members(raw: &str) -> Vec<String> {
    let cleaned = parenthetical().replace_all(raw, " ");
    let parts: Vec<&str> = if cleaned.contains(',') || cleaned.contains(';') {
        cleaned.split([',', ';']).collect()
    } else {
        cleaned.split_whitespace().collect()
    };

    let mut members: Vec<String> = Vec::new();
    for part in parts {
        let member = part.trim();
        if !member.is_empty() && !members.iter().any(|m| m == member) {
            members.push(member.to_string());
        }
    }
    members
}

fn rows_from(table: &Table, path: &Path) -> Result<(Vec<BsoRow>, usize), ParseError> {
    let class_col = table
        .column(&CLASS_COLUMNS)
        .ok_or_else(|| ParseError::invalid(path, "no VN_Class/VerbNet_Class column"))?;
    let category_col = table
        .column(&CATEGORY_COLUMNS)
        .ok_or_else(|| ParseError::invalid(path, "no BSO_Category column"))?;
    let member_col = table.column(&MEMBER_COLUMNS);

    let mut rows = Vec::new();
    let mut skipped = 0;
    for row in &table.rows {
        let class_id = row.get(class_col).map(String::as_str).unwrap_or_default();
        let category = row.get(category_col).map(String::as_str).unwrap_or_default();
        if class_id.is_empty() || category.is_empty() {
            skipped += 1;
            continue;
        }
        let members = member_col
            .and_then(|c| row.get(c))
            .map(|m| split_members(m))
            .unwrap_or_default();
        rows.push(BsoRow {
            class_id: class_id.to_string(),
            category: category.to_string(),
            members,
        });
    }
    Ok((rows, skipped))
}

pub fn parse_mapping_file(path: &Path, max_bytes: u64) -> Result<(Vec<BsoRow>, usize), ParseError> {
    let text = read_capped(path, max_bytes)?;
    let table = parse_table(&text, None).ok_or_else(|| ParseError::invalid(path, "empty table"))?;
    rows_from(&table, path)
}

pub fn read(dir: &Path, options: &ReaderOptions) -> Result<ReadOutcome<BsoMapping>, ReadError> {
    let files: Vec<_> = list_files(dir, |p| has_extension(p, "csv"))?
        .into_iter()
        .filter(|p| {
            let known = direction(&file_name(p)).is_some();
            if !known {
                tracing::debug!(path = %p.display(), "ignoring CSV without a BSO mapping name");
            }
            known
        })
        .collect();

    let results = parse_files(&files, options.workers, |path| {
        parse_mapping_file(path, options.max_file_bytes)
    });

    let mut mapping = BsoMapping::default();
    let mut tally = FileTally::default();
    let mut total_rows = 0usize;
    let mut skipped_rows = 0usize;
    for (path, result) in results {
        let (rows, skipped) = match result {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping BSO mapping file");
                tally.failed();
                continue;
            }
        };
        tally.parsed();
        total_rows += rows.len();
        skipped_rows += skipped;

        match direction(&file_name(&path)) {
            Some(Direction::VnToBso) => {
                for row in rows {
                    if let Some(existing) = mapping.vn_to_bso.get(&row.class_id) {
                        if existing != &row.category {
                            tracing::warn!(
                                class = %row.class_id,
                                kept = %existing,
                                dropped = %row.category,
                                "class mapped to two BSO categories, keeping first"
                            );
                        }
                        continue;
                    }
                    mapping.map_class(&row.class_id, &row.category);
                    mapping.add_category_member(&row.category, &row.class_id, row.members);
                }
            }
            Some(Direction::BsoToVn) => {
                for row in rows {
                    mapping.add_category_member(&row.category, &row.class_id, row.members);
                }
            }
            None => {}
        }
    }

    mapping.reconcile();

    let extra = [
        ("total_mappings", mapping.vn_to_bso.len()),
        ("total_categories", mapping.bso_to_vn.len()),
        ("total_rows", total_rows),
        ("skipped_rows", skipped_rows),
    ];
    tracing::info!(
        corpus = "bso",
        classes = mapping.vn_to_bso.len(),
        categories = mapping.bso_to_vn.len(),
        errors = tally.errors,
        "BSO loaded"
    );
    Ok(tally.finish(mapping, extra))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_drop_notes_and_duplicates() {
        assert_eq!(
            split_members("give (transfer), hand; give ,lend"),
            vec!["give", "hand", "lend"]
        );
        assert_eq!(split_members("run walk  jog"), vec!["run", "walk", "jog"]);
        assert!(split_members("  ").is_empty());
    }

    #[test]
    fn every_parenthetical_is_stripped_in_whitespace_mode() {
        assert_eq!(
            split_members("run (fast) walk (at a slow pace) jog"),
            vec!["run", "walk", "jog"]
        );
        assert_eq!(split_members("(none)"), Vec::<String>::new());
        assert!(std::ptr::eq(parenthetical(), parenthetical()));
    }

    #[test]
    fn file_names_select_direction() {
        assert_eq!(direction("VNBSOMapping_withMembers.csv"), Some(Direction::VnToBso));
        assert_eq!(direction("BSOVNMapping_withMembers.csv"), Some(Direction::BsoToVn));
        assert_eq!(direction("notes.csv"), None);
    }

    #[test]
    fn missing_columns_fail_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VNBSOMapping.csv");
        std::fs::write(&path, "Class,Category\ngive-13.1,Transfer\n").unwrap();
        assert!(parse_mapping_file(&path, 1 << 20).is_err());
    }
}
