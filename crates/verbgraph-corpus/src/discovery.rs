//! Corpus directory discovery by alias probing.

use crate::config::LoaderConfig;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use verbgraph_core::CorpusKind;

/// First alias of `aliases` that names an existing directory under `root`.
pub fn resolve(root: &Path, aliases: &[String]) -> Option<PathBuf> {
    aliases
        .iter()
        .map(|alias| root.join(alias))
        .find(|candidate| candidate.is_dir())
}

/// Resolve every corpus kind. Kinds without a matching directory are absent
/// from the result.
pub fn discover(config: &LoaderConfig) -> BTreeMap<CorpusKind, PathBuf> {
    let root = &config.corpora_root;
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "corpora root does not exist");
        return BTreeMap::new();
    }

    let mut paths = BTreeMap::new();
    for kind in CorpusKind::ALL {
        match resolve(root, &config.aliases_for(kind)) {
            Some(path) => {
                tracing::info!(corpus = %kind, path = %path.display(), "found corpus directory");
                paths.insert(kind, path);
            }
            None => tracing::debug!(corpus = %kind, "corpus directory not found"),
        }
    }
    paths
}
