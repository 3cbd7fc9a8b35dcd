//! Run Orchestration
//!
//! Sequences one wrapper run: log directory, graph before, workflow
//! execution, graph after. Every stage is fatal on failure.

use std::path::Path;
use std::time::Instant;

use log::{error, info, warn};

use super::engine::WorkflowEngine;
use super::graph::{render_dependency_graph, GraphLayout};
use crate::config::RunConfig;
use crate::error::Result;
use crate::layout::LogLayout;
use crate::monitoring::{EventType, RunTimeline};

/// Stage creating the log directory.
pub const STAGE_LOG_DIR: &str = "log_dir";
/// Stage rendering the pre-execution graph.
pub const STAGE_BEFORE_GRAPH: &str = "before_graph";
/// Stage executing the workflow.
pub const STAGE_RUN: &str = "run";
/// Stage rendering the post-execution graph.
pub const STAGE_AFTER_GRAPH: &str = "after_graph";

/// One configured basecalling run.
pub struct Pipeline<E: WorkflowEngine> {
    engine: E,
    layout: GraphLayout,
    config: RunConfig,
    logs: LogLayout,
}

impl<E: WorkflowEngine> Pipeline<E> {
    pub fn new(engine: E, layout: GraphLayout, config: RunConfig) -> Self {
        let logs = LogLayout::new(config.log_dir.clone());
        Self {
            engine,
            layout,
            config,
            logs,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn logs(&self) -> &LogLayout {
        &self.logs
    }

    /// Runs every stage in order and returns the completed timeline.
    ///
    /// The timeline is written to the log directory on success, and on
    /// failure once the directory exists.
    pub fn run(&self) -> Result<RunTimeline> {
        let start_time = Instant::now();
        let mut timeline = RunTimeline::new();

        info!(
            "Starting basecalling run (flowcell: {}, kit: {}, threads: {}, memory: {} GB)",
            self.config.flowcell, self.config.kit, self.config.threads, self.config.memory
        );

        let result = self.run_stages(&mut timeline);

        let log_dir_ready = timeline
            .get_events()
            .iter()
            .any(|e| e.stage == STAGE_LOG_DIR && e.event_type == EventType::Completed);

        match result {
            Ok(()) => {
                timeline.save(&self.logs.timeline_file())?;
                info!("Run completed in {:.2?}", start_time.elapsed());
                Ok(timeline)
            }
            Err(e) => {
                if log_dir_ready {
                    if let Err(save_err) = timeline.save(&self.logs.timeline_file()) {
                        warn!("Could not save timeline: {}", save_err);
                    }
                }
                Err(e)
            }
        }
    }

    fn run_stages(&self, timeline: &mut RunTimeline) -> Result<()> {
        stage(timeline, STAGE_LOG_DIR, || self.logs.ensure())?;

        stage(timeline, STAGE_BEFORE_GRAPH, || {
            self.render_graph(&self.logs.before_graph())
        })?;

        stage(timeline, STAGE_RUN, || self.engine.execute(&self.config))?;

        stage(timeline, STAGE_AFTER_GRAPH, || {
            self.render_graph(&self.logs.after_graph())
        })?;

        Ok(())
    }

    fn render_graph(&self, target: &Path) -> Result<()> {
        render_dependency_graph(&self.engine, &self.layout, &self.config, target)?;
        Ok(())
    }
}

/// Runs `f` as a named stage, recording its outcome.
fn stage<T>(
    timeline: &mut RunTimeline,
    name: &str,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    info!("Stage '{}' started", name);
    timeline.add_event(name, EventType::Started);

    match f() {
        Ok(value) => {
            timeline.add_event(name, EventType::Completed);
            Ok(value)
        }
        Err(e) => {
            error!("Stage '{}' failed: {}", name, e);
            timeline.add_event(name, EventType::Failed);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WrapperError;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    /// Engine that records calls and checks the graph files on disk.
    struct RecordingEngine {
        calls: RefCell<Vec<String>>,
        fail_execute: bool,
    }

    impl RecordingEngine {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_execute: false,
            }
        }
    }

    impl WorkflowEngine for RecordingEngine {
        fn print_dag(&self, config: &RunConfig) -> Result<String> {
            let before = config.log_dir.join("before.svg").exists();
            self.calls
                .borrow_mut()
                .push(format!("dag(before_exists={})", before));
            Ok("digraph snakemake_dag { 0; }".to_string())
        }

        fn execute(&self, config: &RunConfig) -> Result<()> {
            assert!(config.log_dir.join("before.svg").exists());
            self.calls.borrow_mut().push(format!("execute({})", config.threads));
            if self.fail_execute {
                return Err(WrapperError::WorkflowNotFound { searched: vec![] });
            }
            fs::write(config.outdir.join("basecalled.fastq"), "@read\n").unwrap();
            Ok(())
        }
    }

    fn sample_config(outdir: &Path) -> RunConfig {
        RunConfig::new(
            vec!["run1.tar.gz".into()],
            outdir,
            "FLO-MIN106",
            "SQK-RAD003",
            4,
            8,
        )
    }

    fn copy_layout() -> GraphLayout {
        GraphLayout::new("cat").with_args(Vec::<String>::new())
    }

    #[cfg(unix)]
    #[test]
    fn test_run_sequence() {
        let temp_dir = tempdir().unwrap();
        let outdir = temp_dir.path().join("run1");
        let pipeline = Pipeline::new(RecordingEngine::new(), copy_layout(), sample_config(&outdir));

        let timeline = pipeline.run().unwrap();

        assert_eq!(
            *pipeline.engine.calls.borrow(),
            vec![
                "dag(before_exists=false)".to_string(),
                "execute(4)".to_string(),
                "dag(before_exists=true)".to_string(),
            ]
        );
        assert_eq!(
            timeline.stages(),
            vec![STAGE_LOG_DIR, STAGE_BEFORE_GRAPH, STAGE_RUN, STAGE_AFTER_GRAPH]
        );
        assert!(pipeline.logs().before_graph().exists());
        assert!(pipeline.logs().after_graph().exists());
        assert!(pipeline.logs().timeline_file().exists());
        assert!(outdir.join("basecalled.fastq").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_failure_skips_after_graph() {
        let temp_dir = tempdir().unwrap();
        let mut engine = RecordingEngine::new();
        engine.fail_execute = true;
        let pipeline = Pipeline::new(engine, copy_layout(), sample_config(temp_dir.path()));

        let result = pipeline.run();

        assert!(result.is_err());
        assert!(pipeline.logs().before_graph().exists());
        assert!(!pipeline.logs().after_graph().exists());
        assert_eq!(pipeline.engine.calls.borrow().len(), 2);

        let saved = fs::read_to_string(pipeline.logs().timeline_file()).unwrap();
        assert!(saved.contains("failed"));
    }

    #[test]
    fn test_log_dir_failure_stops_before_engine() {
        let temp_dir = tempdir().unwrap();
        let outdir = temp_dir.path().join("occupied");
        fs::create_dir_all(&outdir).unwrap();
        fs::write(outdir.join("logs"), "file in the way").unwrap();

        let pipeline = Pipeline::new(RecordingEngine::new(), copy_layout(), sample_config(&outdir));

        assert!(matches!(pipeline.run(), Err(WrapperError::LogDirectory { .. })));
        assert!(pipeline.engine.calls.borrow().is_empty());
    }

    #[test]
    fn test_stage_records_failure() {
        let mut timeline = RunTimeline::new();
        let result: Result<()> = stage(&mut timeline, "x", || {
            Err(WrapperError::WorkflowNotFound { searched: vec![] })
        });
        assert!(result.is_err());
        assert_eq!(timeline.failed_stage(), Some("x"));
    }
}
