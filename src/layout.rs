//! Output Directory Layout
//!
//! Names the files the wrapper itself writes under `<outdir>/logs` and
//! creates that directory before first use.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Result, WrapperError};

/// Name of the log directory inside the output directory.
pub const LOG_DIR_NAME: &str = "logs";

/// Dependency graph rendered before execution.
pub const BEFORE_GRAPH: &str = "before.svg";

/// Dependency graph rendered after execution.
pub const AFTER_GRAPH: &str = "after.svg";

/// Engine configuration handed over with `--configfile`.
pub const CONFIG_FILE: &str = "config.yaml";

/// Stage timing report.
pub const TIMELINE_FILE: &str = "timeline.json";

/// Paths under the log directory of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLayout {
    log_dir: PathBuf,
}

impl LogLayout {
    /// Layout for an existing log directory path.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// Layout for `outdir/logs`.
    pub fn for_outdir(outdir: &Path) -> Self {
        Self::new(outdir.join(LOG_DIR_NAME))
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn before_graph(&self) -> PathBuf {
        self.log_dir.join(BEFORE_GRAPH)
    }

    pub fn after_graph(&self) -> PathBuf {
        self.log_dir.join(AFTER_GRAPH)
    }

    pub fn config_file(&self) -> PathBuf {
        self.log_dir.join(CONFIG_FILE)
    }

    pub fn timeline_file(&self) -> PathBuf {
        self.log_dir.join(TIMELINE_FILE)
    }

    /// Creates the log directory and any missing parents.
    ///
    /// No-op when the directory already exists.
    pub fn ensure(&self) -> Result<()> {
        if self.log_dir.is_dir() {
            debug!("Log directory exists: {}", self.log_dir.display());
            return Ok(());
        }

        if self.log_dir.exists() {
            return Err(WrapperError::LogDirectory {
                path: self.log_dir.clone(),
                source: io::Error::new(io::ErrorKind::AlreadyExists, "path is not a directory"),
            });
        }

        fs::create_dir_all(&self.log_dir).map_err(|source| WrapperError::LogDirectory {
            path: self.log_dir.clone(),
            source,
        })?;

        info!("Created log directory: {}", self.log_dir.display());
        Ok(())
    }
}
