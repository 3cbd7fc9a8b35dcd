//! Resource Defaults
//!
//! Computes the thread count and memory budget used when the user does
//! not pass `--threads` or `--memory`.

use log::debug;
use sysinfo::System;

/// Upper bound on the default thread count.
pub const MAX_DEFAULT_THREADS: usize = 50;

/// Fraction of free memory granted to the workflow by default.
pub const DEFAULT_MEMORY_FRACTION: f64 = 0.5;

/// Bytes per gigabyte (decimal).
const BYTES_PER_GB: f64 = 1e9;

/// Defaults derived from the host at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDefaults {
    /// Default parallelism limit
    pub threads: u32,
    /// Default memory budget in gigabytes
    pub memory_gb: u64,
    /// Host CPU count was too low and the thread default was raised to 1
    pub threads_raised: bool,
    /// Free memory was too low and the memory default was raised to 1
    pub memory_raised: bool,
}

impl ResourceDefaults {
    /// Probes the current host for logical CPUs and free memory.
    pub fn detect() -> Self {
        let cpus = num_cpus::get();

        let mut system = System::new();
        system.refresh_memory();
        let free_bytes = system.free_memory();

        debug!("Detected {} logical CPUs, {} bytes free memory", cpus, free_bytes);

        Self::from_host(cpus, free_bytes)
    }

    /// Builds defaults from known host figures.
    ///
    /// Both values are raised to 1 when the host is too small to produce
    /// a positive default; [`ResourceDefaults::warnings`] reports which.
    pub fn from_host(cpus: usize, free_bytes: u64) -> Self {
        let threads = default_threads(cpus);
        let memory_gb = default_memory_gb(free_bytes);

        Self {
            threads: u32::try_from(threads.max(1)).unwrap_or(u32::MAX),
            memory_gb: memory_gb.max(1),
            threads_raised: threads == 0,
            memory_raised: memory_gb == 0,
        }
    }

    /// Builds defaults from fixed values, with nothing raised.
    pub const fn fixed(threads: u32, memory_gb: u64) -> Self {
        Self {
            threads,
            memory_gb,
            threads_raised: false,
            memory_raised: false,
        }
    }

    /// Messages for defaults that had to be raised to 1.
    ///
    /// Probing happens before argument parsing, so these are logged once
    /// the logger exists.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.threads_raised {
            warnings.push("Fewer than 2 CPUs detected, defaulting to 1 thread".to_string());
        }
        if self.memory_raised {
            warnings.push("Less than 2 GB free memory, defaulting to a 1 GB budget".to_string());
        }
        warnings
    }
}

/// Half the logical CPUs, capped at [`MAX_DEFAULT_THREADS`].
pub fn default_threads(cpus: usize) -> usize {
    (cpus / 2).min(MAX_DEFAULT_THREADS)
}

/// `floor(0.5 * free_bytes / 1e9)`.
pub fn default_memory_gb(free_bytes: u64) -> u64 {
    (free_bytes as f64 * DEFAULT_MEMORY_FRACTION / BYTES_PER_GB).floor() as u64
}
