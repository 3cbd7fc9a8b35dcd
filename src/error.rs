//! Error Types
//!
//! Every runtime failure of the wrapper is fatal to the run, so a single
//! error enum covers the whole crate. Usage errors are reported by clap
//! and never reach this type.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WrapperError>;

/// Errors raised while preparing or running the basecalling workflow.
#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("workflow definition not found (searched: {})", format_paths(.searched))]
    WorkflowNotFound { searched: Vec<PathBuf> },

    #[error("cannot create log directory {}: {source}", .path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write engine configuration {}: {message}", .path.display())]
    ConfigWrite { path: PathBuf, message: String },

    #[error("failed to launch workflow engine '{program}': {source}")]
    EngineSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("workflow engine {stage} exited with {status}{}", format_stderr(.stderr))]
    EngineFailed {
        stage: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to run graph layout tool '{program}': {source}")]
    LayoutSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("graph layout tool exited with {status}{}", format_stderr(.stderr))]
    LayoutFailed { status: ExitStatus, stderr: String },

    #[error("cannot write dependency graph {}: {source}", .path.display())]
    GraphWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write run timeline {}: {message}", .path.display())]
    Timeline { path: PathBuf, message: String },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{}", trimmed)
    }
}
