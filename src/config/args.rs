//! Command-Line Arguments
//!
//! Flag definitions for the wrapper. The `--threads` and `--memory`
//! defaults depend on the host, so they are injected into the clap
//! command at runtime and shown in `--help`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser};

use super::defaults::ResourceDefaults;

/// Default workflow engine executable.
pub const DEFAULT_SNAKEMAKE: &str = "snakemake";

/// Default graph layout executable.
pub const DEFAULT_DOT: &str = "dot";

#[derive(Parser, Debug, Clone)]
#[command(name = "basecall_wrapper")]
#[command(about = "Configure and launch the Nanopore basecalling workflow")]
#[command(version)]
pub struct Args {
    /// .tar.gz files containing raw Nanopore data folders
    #[arg(long = "input", value_name = "ARCHIVE", required = true)]
    pub raw_data: Vec<PathBuf>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    pub outdir: PathBuf,

    /// Flowcell type, e.g. FLO-MIN106
    #[arg(long)]
    pub flowcell: String,

    /// Sequencing kit, e.g. SQK-RAD003
    #[arg(long)]
    pub kit: String,

    /// Number of threads
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,

    /// Memory limit in GB
    #[arg(long, value_name = "GB", value_parser = clap::value_parser!(u64).range(1..))]
    pub memory: u64,

    /// Workflow definition (Snakefile) to run. No Snakefile ships with this
    /// build: unless one is installed as config/Snakefile next to the
    /// executable, this option is required
    #[arg(long, value_name = "PATH", env = "BASECALL_WRAPPER_SNAKEFILE")]
    pub snakefile: Option<PathBuf>,

    /// Workflow engine executable
    #[arg(
        long,
        value_name = "EXE",
        env = "BASECALL_WRAPPER_SNAKEMAKE",
        default_value = DEFAULT_SNAKEMAKE
    )]
    pub snakemake: String,

    /// Graph layout executable
    #[arg(long, value_name = "EXE", env = "BASECALL_WRAPPER_DOT", default_value = DEFAULT_DOT)]
    pub dot: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the clap command with host-derived defaults filled in.
    pub fn command_with_defaults(defaults: &ResourceDefaults) -> clap::Command {
        Self::command()
            .mut_arg("threads", |arg| {
                arg.required(false)
                    .default_value(defaults.threads.to_string())
                    .hide_default_value(true)
                    .help(format!("Number of threads. Default: {}", defaults.threads))
            })
            .mut_arg("memory", |arg| {
                arg.required(false)
                    .default_value(defaults.memory_gb.to_string())
                    .hide_default_value(true)
                    .help(format!("Memory limit. Default: {}", defaults.memory_gb))
            })
    }

    /// Parses `itr` against the command built by [`Args::command_with_defaults`].
    pub fn try_parse_with_defaults<I, T>(
        itr: I,
        defaults: &ResourceDefaults,
    ) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut matches = Self::command_with_defaults(defaults).try_get_matches_from(itr)?;
        Self::from_arg_matches_mut(&mut matches)
    }

    /// Parses the process arguments, exiting with usage text on failure.
    pub fn parse_with_defaults(defaults: &ResourceDefaults) -> Self {
        Self::try_parse_with_defaults(std::env::args_os(), defaults).unwrap_or_else(|e| e.exit())
    }
}
