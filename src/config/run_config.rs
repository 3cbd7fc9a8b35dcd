//! Run Configuration
//!
//! The mapping handed to the workflow engine. Key names follow what the
//! basecalling Snakefile reads from `config[...]`.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::args::Args;
use crate::error::{Result, WrapperError};
use crate::layout::LOG_DIR_NAME;

/// Configuration for one invocation of the basecalling workflow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Archives containing raw Nanopore data folders
    pub raw_data: Vec<PathBuf>,

    /// Output directory
    pub outdir: PathBuf,

    /// Flowcell identifier, e.g. FLO-MIN106
    pub flowcell: String,

    /// Sequencing kit identifier, e.g. SQK-RAD003
    pub kit: String,

    /// Parallelism limit handed to the engine
    pub threads: u32,

    /// Memory budget in gigabytes
    pub memory: u64,

    /// Always `outdir/logs`
    pub log_dir: PathBuf,
}

impl RunConfig {
    /// Creates a configuration, deriving `log_dir` from `outdir`.
    pub fn new(
        raw_data: Vec<PathBuf>,
        outdir: impl Into<PathBuf>,
        flowcell: impl Into<String>,
        kit: impl Into<String>,
        threads: u32,
        memory: u64,
    ) -> Self {
        let outdir = outdir.into();
        let log_dir = outdir.join(LOG_DIR_NAME);
        Self {
            raw_data,
            outdir,
            flowcell: flowcell.into(),
            kit: kit.into(),
            threads,
            memory,
            log_dir,
        }
    }

    /// Renders the configuration as engine-readable YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Writes the configuration to `path` for `--configfile`.
    pub fn write_config_file(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml().map_err(|e| WrapperError::ConfigWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        fs::write(path, yaml).map_err(|e| WrapperError::ConfigWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!("Wrote engine configuration to {}", path.display());
        Ok(())
    }
}

impl From<&Args> for RunConfig {
    fn from(args: &Args) -> Self {
        Self::new(
            args.raw_data.clone(),
            args.outdir.clone(),
            args.flowcell.clone(),
            args.kit.clone(),
            args.threads,
            args.memory,
        )
    }
}
