//! Snakefile Resolution
//!
//! Locates the basecalling workflow definition once at startup. The
//! resolved path is handed to the engine explicitly.
//!
//! # Resolution Priority
//!
//! 1. Explicit path from `--snakefile` or `BASECALL_WRAPPER_SNAKEFILE`
//! 2. Production path: `config/Snakefile` next to the executable
//! 3. Development path: `{crate_root}/config/Snakefile`

use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Result, WrapperError};

/// Directory holding the bundled workflow definition.
pub const BUNDLED_DIR: &str = "config";

/// File name of the bundled workflow definition.
pub const SNAKEFILE_NAME: &str = "Snakefile";

/// Resolves the workflow definition to run.
///
/// An explicit path is used as-is but must point at an existing file.
pub fn resolve_snakefile(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            info!("Using workflow definition: {}", path.display());
            return Ok(path.to_path_buf());
        }
        return Err(WrapperError::WorkflowNotFound {
            searched: vec![path.to_path_buf()],
        });
    }

    let candidates = bundled_candidates();
    match candidates.iter().find(|path| path.is_file()) {
        Some(path) => {
            info!("Using bundled workflow definition: {}", path.display());
            Ok(path.clone())
        }
        None => Err(WrapperError::WorkflowNotFound {
            searched: candidates,
        }),
    }
}

/// Bundled locations in priority order.
fn bundled_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join(BUNDLED_DIR).join(SNAKEFILE_NAME));
        }
    }

    candidates.push(
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join(BUNDLED_DIR)
            .join(SNAKEFILE_NAME),
    );

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_existing_file() {
        let temp_dir = tempdir().unwrap();
        let snakefile = temp_dir.path().join("Snakefile");
        fs::write(&snakefile, "rule all:\n    input: []\n").unwrap();

        let resolved = resolve_snakefile(Some(&snakefile)).unwrap();
        assert_eq!(resolved, snakefile);
    }

    #[test]
    fn test_explicit_missing_file() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope");

        match resolve_snakefile(Some(&missing)) {
            Err(WrapperError::WorkflowNotFound { searched }) => {
                assert_eq!(searched, vec![missing]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_explicit_directory_rejected() {
        let temp_dir = tempdir().unwrap();
        assert!(resolve_snakefile(Some(temp_dir.path())).is_err());
    }

    #[test]
    fn test_bundled_candidates_order() {
        let candidates = bundled_candidates();
        assert!(!candidates.is_empty());
        let last = candidates.last().unwrap();
        assert!(last.starts_with(env!("CARGO_MANIFEST_DIR")));
        assert!(candidates
            .iter()
            .all(|c| c.ends_with(Path::new(BUNDLED_DIR).join(SNAKEFILE_NAME))));
    }
}
