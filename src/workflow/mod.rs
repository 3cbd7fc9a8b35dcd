//! Workflow Definition Module
//!
//! The basecalling workflow itself is an external Snakefile; this module
//! only finds it.

pub mod snakefile;

pub use snakefile::resolve_snakefile;
