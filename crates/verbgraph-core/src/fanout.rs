//! Bounded parallel parsing of independent corpus files.
//!
//! Workers only parse; they never touch shared state. The caller receives the
//! per-file results in input order and folds them into its tree on one thread.

use crate::error::ParseError;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub type FileResult<T> = (PathBuf, Result<T, ParseError>);

/// Parse `files` on a pool of at most `workers` threads.
pub fn parse_files<T, F>(files: &[PathBuf], workers: usize, parse: F) -> Vec<FileResult<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T, ParseError> + Sync,
{
    let run = || {
        files
            .par_iter()
            .map(|path| (path.clone(), parse(path)))
            .collect::<Vec<_>>()
    };

    if files.len() < 2 || workers <= 1 {
        return files.iter().map(|path| (path.clone(), parse(path))).collect();
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(workers.min(files.len()))
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(err) => {
            tracing::warn!(error = %err, "worker pool unavailable, parsing sequentially");
            files.iter().map(|path| (path.clone(), parse(path))).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_keep_input_order() {
        let files: Vec<PathBuf> = (0..32).map(|i| PathBuf::from(format!("f{i:02}"))).collect();
        let results = parse_files(&files, 4, |path| {
            let name = path.to_string_lossy().to_string();
            if name.ends_with('7') {
                Err(ParseError::invalid(path, "seven"))
            } else {
                Ok(name)
            }
        });

        assert_eq!(results.len(), 32);
        for (i, (path, result)) in results.iter().enumerate() {
            assert_eq!(path, &files[i]);
            assert_eq!(result.is_err(), i % 10 == 7);
        }
    }
}
