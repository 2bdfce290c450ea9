//! Delimited (CSV/TSV) records with double-quoted fields.
//!
//! Quoted fields may contain the delimiter, line breaks and doubled quotes
//! (`""`). Rows are keyed by the header row's column names.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

impl Table {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// First header among `aliases` that the table actually has.
    pub fn column<'a>(&self, aliases: &[&'a str]) -> Option<&'a str> {
        aliases.iter().copied().find(|a| self.has_column(a))
    }
}

/// Tab when the header line contains one, comma otherwise.
pub fn detect_delimiter(text: &str) -> char {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or_default();
    if header.contains('\t') {
        '\t'
    } else {
        ','
    }
}

/// Split `text` into records of raw fields.
pub fn records(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                if !(record.len() == 1 && record[0].trim().is_empty()) {
                    out.push(std::mem::take(&mut record));
                } else {
                    record.clear();
                }
            }
            c if c == delimiter => record.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        if !(record.len() == 1 && record[0].trim().is_empty()) {
            out.push(record);
        }
    }
    out
}

/// Parse a table whose first record is the header. Cells are trimmed; short
/// rows are padded with empty cells, extra cells are dropped.
pub fn parse_table(text: &str, delimiter: Option<char>) -> Option<Table> {
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(text));
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = records(text, delimiter).into_iter();
    let headers: Vec<String> = records
        .next()?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let rows = records
        .map(|record| {
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    let cell = record.get(i).map(|c| c.trim()).unwrap_or_default();
                    (h.clone(), cell.to_string())
                })
                .collect()
        })
        .collect();

    Some(Table { headers, rows })
}
