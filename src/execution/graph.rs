//! Dependency Graph Rendering
//!
//! Captures the engine's DAG printout and lays it out as SVG with
//! Graphviz `dot`.

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use log::{debug, info, warn};

use super::engine::WorkflowEngine;
use crate::config::RunConfig;
use crate::error::{Result, WrapperError};

/// Graphviz layout driver emitting SVG.
#[derive(Debug, Clone)]
pub struct GraphLayout {
    program: String,
    args: Vec<String>,
}

impl GraphLayout {
    /// Layout driver invoking `program -Tsvg`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["-Tsvg".to_string()],
        }
    }

    /// Replaces the arguments passed to the layout program.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Lays out `dag` and writes the SVG to `target`.
    pub fn render(&self, dag: &str, target: &Path) -> Result<()> {
        let svg = File::create(target).map_err(|source| WrapperError::GraphWrite {
            path: target.to_path_buf(),
            source,
        })?;

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(svg))
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| WrapperError::LayoutSpawn {
                program: self.program.clone(),
                source,
            })?;

        let mut guard = ChildGuard::new(child);

        if let Some(mut stdin) = guard.child_mut().stdin.take() {
            match stdin.write_all(dag.as_bytes()) {
                Ok(()) => {}
                // the tool exited before reading everything; its status says why
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("Layout tool closed its input early");
                }
                Err(source) => {
                    return Err(WrapperError::LayoutSpawn {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
            // dropping stdin closes the pipe so dot sees EOF
        }

        let mut stderr = String::new();
        if let Some(mut pipe) = guard.child_mut().stderr.take() {
            if let Err(e) = pipe.read_to_string(&mut stderr) {
                warn!("Could not read layout diagnostics: {}", e);
            }
        }

        let status = guard.wait().map_err(|source| WrapperError::LayoutSpawn {
            program: self.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(WrapperError::LayoutFailed { status, stderr })
        }
    }
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self::new(crate::config::args::DEFAULT_DOT)
    }
}

/// Owns a child process and reaps it on every exit path.
struct ChildGuard {
    child: Child,
    finished: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            finished: false,
        }
    }

    fn child_mut(&mut self) -> &mut Child {
        &mut self.child
    }

    fn wait(&mut self) -> std::io::Result<std::process::ExitStatus> {
        let status = self.child.wait()?;
        self.finished = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        debug!("Stopping layout process {}", self.child.id());
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Renders the workflow's dependency graph to `target`.
///
/// The engine is queried first; the SVG file is only created once the
/// dry run has succeeded.
pub fn render_dependency_graph<E: WorkflowEngine + ?Sized>(
    engine: &E,
    layout: &GraphLayout,
    config: &RunConfig,
    target: &Path,
) -> Result<PathBuf> {
    let dag = engine.print_dag(config)?;
    debug!("Captured {} bytes of DAG description", dag.len());

    layout.render(&dag, target)?;
    info!("Dependency graph written to {}", target.display());

    Ok(target.to_path_buf())
}
