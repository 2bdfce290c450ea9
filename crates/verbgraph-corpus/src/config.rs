//! Loader configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use verbgraph_core::{CorpusKind, ReaderOptions};

// ============================================================================
// Loader Configuration
// ============================================================================

/// Configuration for [`crate::CorpusLoader`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory holding one sub-directory per corpus
    pub corpora_root: PathBuf,
    /// Directory names to try per corpus, replacing the built-in list
    pub aliases: BTreeMap<CorpusKind, Vec<String>>,
    /// Limits passed to every format reader
    pub reader: ReaderOptions,
    /// Load independent corpora concurrently in `load_all`
    pub parallel_corpora: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            corpora_root: PathBuf::from("./corpora"),
            aliases: BTreeMap::new(),
            reader: ReaderOptions::default(),
            parallel_corpora: true,
        }
    }
}

impl LoaderConfig {
    pub fn new(corpora_root: impl Into<PathBuf>) -> Self {
        Self {
            corpora_root: corpora_root.into(),
            ..Self::default()
        }
    }

    /// Aliases tried for `kind`: the configured override if any, else the defaults.
    pub fn aliases_for(&self, kind: CorpusKind) -> Vec<String> {
        match self.aliases.get(&kind) {
            Some(aliases) if !aliases.is_empty() => aliases.clone(),
            _ => kind
                .default_aliases()
                .iter()
                .map(|alias| alias.to_string())
                .collect(),
        }
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid loader configuration")
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read loader configuration {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("while loading {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LoaderConfig::from_json_str(
            r#"{"corpora_root": "/data/corpora", "reader": {"max_subclass_depth": 4}}"#,
        )
        .unwrap();

        assert_eq!(config.corpora_root, PathBuf::from("/data/corpora"));
        assert_eq!(config.reader.max_subclass_depth, 4);
        assert_eq!(
            config.reader.max_file_bytes,
            ReaderOptions::default().max_file_bytes
        );
        assert!(config.parallel_corpora);
    }

    #[test]
    fn alias_override_replaces_defaults() {
        let config = LoaderConfig::from_json_str(
            r#"{"aliases": {"verbnet": ["vn-3.4"], "framenet": []}}"#,
        )
        .unwrap();

        assert_eq!(config.aliases_for(CorpusKind::VerbNet), vec!["vn-3.4"]);
        assert_eq!(
            config.aliases_for(CorpusKind::FrameNet),
            vec!["framenet", "fn", "framenet1.7"]
        );
    }

    #[test]
    fn unknown_corpus_in_aliases_is_rejected() {
        assert!(LoaderConfig::from_json_str(r#"{"aliases": {"vn_api": ["x"]}}"#).is_err());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.json");
        std::fs::write(&path, r#"{"parallel_corpora": false}"#).unwrap();

        let config = LoaderConfig::from_json_file(&path).unwrap();
        assert!(!config.parallel_corpora);
        assert!(LoaderConfig::from_json_file(&dir.path().join("missing.json")).is_err());
    }
}
