//! basecall_wrapper CLI Entry Point
//!
//! # Usage
//!
//! ```bash
//! basecall_wrapper \
//!     --input run1.tar.gz --input run2.tar.gz \
//!     --outdir /data/basecalled \
//!     --flowcell FLO-MIN106 \
//!     --kit SQK-RAD003 \
//!     --threads 16 --memory 64 \
//!     --snakefile /opt/basecall/Snakefile
//! ```
//!
//! No Snakefile ships with the crate. `--snakefile` (or
//! `BASECALL_WRAPPER_SNAKEFILE`) is required unless a workflow definition
//! is installed as `config/Snakefile` next to the executable.

use std::process::ExitCode;

use colored::Colorize;
use log::{error, info, warn};

use basecall_wrapper::config::{Args, ResourceDefaults, RunConfig};
use basecall_wrapper::execution::{GraphLayout, Pipeline, Snakemake};
use basecall_wrapper::layout::LogLayout;
use basecall_wrapper::workflow::resolve_snakefile;
use basecall_wrapper::{APP_NAME, VERSION};

/// Timestamp format for log messages, e.g. `Mon Oct 19 14:02:11 2026`.
const LOG_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            let now = chrono::Local::now().format(LOG_TIME_FORMAT);
            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[ {} ]: [{}] {}", now, record.level(), record.args())
                }
                _ => writeln!(buf, "[ {} ]: {}", now, record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME.bold(), VERSION);
    println!("Nanopore basecalling launcher");
    println!();
}

/// Main application entry point.
fn run(args: Args, defaults: ResourceDefaults) -> Result<(), Box<dyn std::error::Error>> {
    setup_logging(args.verbose);
    print_banner();

    for message in defaults.warnings() {
        warn!("{}", message);
    }

    let config = RunConfig::from(&args);
    for archive in &config.raw_data {
        info!("Input: {}", archive.display());
    }
    info!("Output directory: {}", config.outdir.display());

    let snakefile = resolve_snakefile(args.snakefile.as_deref())?;
    let logs = LogLayout::new(config.log_dir.clone());

    let engine = Snakemake::new(snakefile, logs.config_file()).with_program(args.snakemake);
    let layout = GraphLayout::new(args.dot);

    let timeline = Pipeline::new(engine, layout, config).run().map_err(|e| {
        error!("Basecalling run failed");
        e
    })?;

    println!();
    println!("{}", "Basecalling workflow completed successfully".green());
    println!("{}", timeline.summary());

    Ok(())
}

fn main() -> ExitCode {
    let defaults = ResourceDefaults::detect();
    let args = Args::parse_with_defaults(&defaults);

    match run(args, defaults) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
