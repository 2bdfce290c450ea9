//! Readers for the flat corpora: BSO mapping tables, the SemNet JSON
//! networks and the VerbNet reference documentation (JSON + TSV).

pub mod bso;
pub mod delimited;
pub mod reference;
pub mod semnet;
