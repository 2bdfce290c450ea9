//! XML corpus readers.
//!
//! Each reader maps one corpus directory to a normalized tree from
//! `verbgraph-core`. Files are parsed independently on a bounded worker pool
//! (see [`verbgraph_core::parse_files`]) into a small owned element tree
//! ([`dom::Element`]), then folded into the corpus tree on the calling thread.
//!
//! A file that is not well-formed, has the wrong root element, nests too deeply
//! or is above the size ceiling is logged and counted in `error_files`; it
//! never aborts the corpus.

pub mod dom;
pub mod framenet;
pub mod ontonotes;
pub mod propbank;
pub mod verbnet;

use std::path::Path;
use verbgraph_core::files::has_extension;

pub(crate) fn is_xml(path: &Path) -> bool {
    has_extension(path, "xml")
}
