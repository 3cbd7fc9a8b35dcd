//! Run Configuration Module
//!
//! Turns command-line arguments and host-derived defaults into the
//! configuration mapping passed to the workflow engine.
//!
//! - [`args`]: clap flag definitions
//! - [`defaults`]: thread and memory defaults from the host
//! - [`run_config`]: the engine-facing configuration

pub mod args;
pub mod defaults;
pub mod run_config;

pub use args::Args;
pub use defaults::ResourceDefaults;
pub use run_config::RunConfig;
