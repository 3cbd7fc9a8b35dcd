//! Workflow Engine Invocation
//!
//! Drives Snakemake as a subprocess. The wrapper never schedules work
//! itself: it hands the engine a configuration file and a core count
//! and waits.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, error, info};

use crate::config::RunConfig;
use crate::error::{Result, WrapperError};

/// Operations the orchestrator needs from a workflow engine.
pub trait WorkflowEngine {
    /// Dry-runs the workflow and returns its dependency graph in dot syntax.
    fn print_dag(&self, config: &RunConfig) -> Result<String>;

    /// Executes the workflow, blocking until the engine exits.
    fn execute(&self, config: &RunConfig) -> Result<()>;
}

/// Snakemake command-line driver.
///
/// # Example
///
/// ```rust,no_run
/// use basecall_wrapper::config::RunConfig;
/// use basecall_wrapper::execution::{Snakemake, WorkflowEngine};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = RunConfig::new(
///         vec!["run1.tar.gz".into()],
///         "/data/run1",
///         "FLO-MIN106",
///         "SQK-RAD003",
///         8,
///         32,
///     );
///     let engine = Snakemake::new("config/Snakefile", "/data/run1/logs/config.yaml");
///     engine.execute(&config)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Snakemake {
    program: String,
    snakefile: PathBuf,
    config_file: PathBuf,
}

impl Snakemake {
    /// Creates a driver for the `snakemake` on `PATH`.
    ///
    /// `config_file` is rewritten from the run configuration before each
    /// invocation.
    pub fn new(snakefile: impl Into<PathBuf>, config_file: impl Into<PathBuf>) -> Self {
        Self {
            program: crate::config::args::DEFAULT_SNAKEMAKE.to_string(),
            snakefile: snakefile.into(),
            config_file: config_file.into(),
        }
    }

    /// Uses a different engine executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn snakefile(&self) -> &Path {
        &self.snakefile
    }

    /// Arguments shared by every invocation.
    fn base_args(&self) -> Vec<String> {
        vec![
            "--snakefile".to_string(),
            self.snakefile.display().to_string(),
            "--configfile".to_string(),
            self.config_file.display().to_string(),
        ]
    }

    /// Arguments for a dry run that prints the DAG.
    pub fn dag_args(&self) -> Vec<String> {
        let mut args = self.base_args();
        args.push("--dry-run".to_string());
        args.push("--dag".to_string());
        args
    }

    /// Arguments for a real run.
    pub fn run_args(&self, config: &RunConfig) -> Vec<String> {
        let mut args = self.base_args();
        args.push("--cores".to_string());
        args.push(config.threads.to_string());
        args.push("--timestamp".to_string());
        args
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        cmd
    }
}

impl WorkflowEngine for Snakemake {
    fn print_dag(&self, config: &RunConfig) -> Result<String> {
        config.write_config_file(&self.config_file)?;

        let args = self.dag_args();
        debug!("Running: {} {}", self.program, args.join(" "));

        let output = self
            .command(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| WrapperError::EngineSpawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stderr.trim().is_empty() {
            debug!("Engine dry-run diagnostics:\n{}", stderr.trim_end());
        }

        if !output.status.success() {
            error!("Engine dry-run failed with exit code: {:?}", output.status.code());
            return Err(WrapperError::EngineFailed {
                stage: "dry-run",
                status: output.status,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn execute(&self, config: &RunConfig) -> Result<()> {
        config.write_config_file(&self.config_file)?;

        let args = self.run_args(config);
        info!("Running: {} {}", self.program, args.join(" "));

        let status = self
            .command(&args)
            .status()
            .map_err(|source| WrapperError::EngineSpawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            error!("Engine run failed with exit code: {:?}", status.code());
            Err(WrapperError::EngineFailed {
                stage: "run",
                status,
                stderr: String::new(),
            })
        }
    }
}
