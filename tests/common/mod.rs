// Shared fixtures for driving the compiled binary against stand-in tools

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Engine stand-in: logs its arguments, prints a DAG on `--dag`, and on a
/// real run refuses to proceed unless the pre-execution graph exists.
const FAKE_SNAKEMAKE: &str = r#"#!/bin/sh
echo "$@" >> "$FAKE_ENGINE_LOG"
case " $* " in
  *" --dag "*)
    echo "Building DAG of jobs..." >&2
    echo 'digraph snakemake_dag { 0[label = "all"]; 1[label = "basecall"]; 1 -> 0 }'
    ;;
  *)
    test -f "$FAKE_BEFORE_SVG" || exit 3
    touch "$FAKE_WORKFLOW_OUTPUT"
    ;;
esac
"#;

/// Engine stand-in whose dry run fails.
const FAILING_SNAKEMAKE: &str = r#"#!/bin/sh
echo "$@" >> "$FAKE_ENGINE_LOG"
echo "SyntaxError in Snakefile" >&2
exit 1
"#;

/// Layout stand-in copying stdin to stdout.
const FAKE_DOT: &str = "#!/bin/sh\ncat\n";

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn outdir(&self) -> PathBuf {
        self.path().join("run1")
    }

    pub fn engine_log(&self) -> PathBuf {
        self.path().join("engine.log")
    }

    pub fn workflow_output(&self) -> PathBuf {
        self.outdir().join("basecalled.fastq.gz")
    }

    pub fn snakefile(&self) -> PathBuf {
        let path = self.path().join("Snakefile");
        if !path.exists() {
            fs::write(&path, "rule all:\n    input: []\n").expect("Failed to write Snakefile");
        }
        path
    }

    pub fn fake_snakemake(&self) -> PathBuf {
        self.write_script("snakemake", FAKE_SNAKEMAKE)
    }

    pub fn failing_snakemake(&self) -> PathBuf {
        self.write_script("snakemake-broken", FAILING_SNAKEMAKE)
    }

    pub fn fake_dot(&self) -> PathBuf {
        self.write_script("dot", FAKE_DOT)
    }

    fn write_script(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write script");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to make script executable");
        }

        path
    }

    /// Runs the wrapper binary with the stand-in environment variables set.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_basecall_wrapper"))
            .args(args)
            .env("FAKE_ENGINE_LOG", self.engine_log())
            .env("FAKE_BEFORE_SVG", self.outdir().join("logs").join("before.svg"))
            .env("FAKE_WORKFLOW_OUTPUT", self.workflow_output())
            .env_remove("BASECALL_WRAPPER_SNAKEFILE")
            .env_remove("BASECALL_WRAPPER_SNAKEMAKE")
            .env_remove("BASECALL_WRAPPER_DOT")
            .output()
            .expect("Failed to execute basecall_wrapper")
    }

    pub fn engine_calls(&self) -> Vec<String> {
        fs::read_to_string(self.engine_log())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
