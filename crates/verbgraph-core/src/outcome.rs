//! Reader results and per-corpus statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat counter map attached to every loaded corpus (`statistics` sub-map).
pub type Statistics = BTreeMap<String, u64>;

/// What every format reader hands back: the normalized tree, its statistics
/// and the number of files that were skipped.
#[derive(Debug, Clone)]
pub struct ReadOutcome<T> {
    pub tree: T,
    pub statistics: Statistics,
    pub error_files: usize,
}

impl<T> ReadOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadOutcome<U> {
        ReadOutcome {
            tree: f(self.tree),
            statistics: self.statistics,
            error_files: self.error_files,
        }
    }
}

/// Knobs shared by all readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Upper bound on parser threads for one corpus.
    pub workers: usize,
    /// Files larger than this are skipped and counted as errors.
    pub max_file_bytes: u64,
    /// Maximum VerbNet `VNSUBCLASS` nesting depth.
    pub max_subclass_depth: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            max_file_bytes: 64 * 1024 * 1024,
            max_subclass_depth: 32,
        }
    }
}

/// Running file counts for one corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileTally {
    pub total: usize,
    pub parsed: usize,
    pub errors: usize,
}

impl FileTally {
    pub fn parsed(&mut self) {
        self.total += 1;
        self.parsed += 1;
    }

    pub fn failed(&mut self) {
        self.total += 1;
        self.errors += 1;
    }

    /// Seed a statistics map with `total_files` / `parsed_files` / `error_files`.
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics::new();
        stats.insert("total_files".to_string(), self.total as u64);
        stats.insert("parsed_files".to_string(), self.parsed as u64);
        stats.insert("error_files".to_string(), self.errors as u64);
        stats
    }

    pub fn finish<T>(self, tree: T, extra: impl IntoIterator<Item = (&'static str, usize)>) -> ReadOutcome<T> {
        let mut statistics = self.statistics();
        for (key, value) in extra {
            statistics.insert(key.to_string(), value as u64);
        }
        ReadOutcome {
            tree,
            statistics,
            error_files: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_feed_statistics() {
        let mut tally = FileTally::default();
        tally.parsed();
        tally.parsed();
        tally.failed();

        let outcome = tally.finish((), [("total_classes", 2)]);
        assert_eq!(outcome.error_files, 1);
        assert_eq!(outcome.statistics["total_files"], 3);
        assert_eq!(outcome.statistics["parsed_files"], 2);
        assert_eq!(outcome.statistics["error_files"], 1);
        assert_eq!(outcome.statistics["total_classes"], 2);
    }
}
