//! Workflow Execution Module
//!
//! Drives the external workflow engine and the graph layout tool.
//!
//! # Architecture
//!
//! - [`engine`]: Snakemake invocation (dry-run DAG capture and real runs)
//! - [`graph`]: DAG to SVG rendering through Graphviz
//! - [`pipeline`]: stage sequencing for one run

pub mod engine;
pub mod graph;
pub mod pipeline;

pub use engine::{Snakemake, WorkflowEngine};
pub use graph::{render_dependency_graph, GraphLayout};
pub use pipeline::Pipeline;
