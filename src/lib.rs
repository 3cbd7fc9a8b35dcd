//! basecall_wrapper - Nanopore Basecalling Launcher
//!
//! A thin command-line front-end around a Snakemake basecalling
//! workflow. The wrapper derives a thread count and memory budget,
//! prepares `<outdir>/logs`, and hands everything else to the engine.
//!
//! # Architecture
//!
//! - [`config`]: argument parsing, host defaults, engine configuration
//! - [`layout`]: files written under the log directory
//! - [`workflow`]: locating the Snakefile
//! - [`execution`]: engine invocation, graph rendering, stage sequencing
//! - [`monitoring`]: stage timeline
//!
//! # Example
//!
//! ```rust,no_run
//! use basecall_wrapper::config::RunConfig;
//! use basecall_wrapper::execution::{GraphLayout, Pipeline, Snakemake};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::new(
//!         vec!["run1.tar.gz".into()],
//!         "/data/run1",
//!         "FLO-MIN106",
//!         "SQK-RAD003",
//!         8,
//!         32,
//!     );
//!     let engine = Snakemake::new("config/Snakefile", "/data/run1/logs/config.yaml");
//!     Pipeline::new(engine, GraphLayout::default(), config).run()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod layout;
pub mod monitoring;
pub mod workflow;

// Re-export commonly used types
pub use config::{Args, ResourceDefaults, RunConfig};
pub use error::{Result, WrapperError};
pub use execution::{GraphLayout, Pipeline, Snakemake, WorkflowEngine};
pub use layout::LogLayout;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "basecall_wrapper";
