//! Run Timeline
//!
//! Records when each orchestration stage started and finished, and
//! writes the record next to the dependency graphs.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WrapperError};

/// Type of timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Stage started
    Started,
    /// Stage completed successfully
    Completed,
    /// Stage failed
    Failed,
}

/// A single event in the run timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Stage name
    pub stage: String,
    /// Type of event
    pub event_type: EventType,
    /// When the event occurred
    pub timestamp: DateTime<Local>,
}

/// Ordered record of stage events for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTimeline {
    started_at: DateTime<Local>,
    events: Vec<TimelineEvent>,
}

impl RunTimeline {
    /// Creates a new timeline starting now.
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            events: Vec::new(),
        }
    }

    /// Records an event for a stage.
    pub fn add_event(&mut self, stage: impl Into<String>, event_type: EventType) {
        self.events.push(TimelineEvent {
            stage: stage.into(),
            event_type,
            timestamp: Local::now(),
        });
    }

    /// Returns all recorded events.
    pub fn get_events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Stage names in the order they started.
    pub fn stages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.event_type == EventType::Started)
            .map(|e| e.stage.as_str())
            .collect()
    }

    /// Returns the stage that failed, if any.
    pub fn failed_stage(&self) -> Option<&str> {
        self.events
            .iter()
            .find(|e| e.event_type == EventType::Failed)
            .map(|e| e.stage.as_str())
    }

    /// One line per finished stage with its wall-clock duration.
    pub fn summary(&self) -> String {
        let mut output = String::from("Run Timeline:\n");

        for end in self
            .events
            .iter()
            .filter(|e| e.event_type != EventType::Started)
        {
            let start = self
                .events
                .iter()
                .find(|e| e.event_type == EventType::Started && e.stage == end.stage);

            let seconds = start
                .map(|s| (end.timestamp - s.timestamp).num_milliseconds() as f64 / 1000.0)
                .unwrap_or(0.0);

            let marker = match end.event_type {
                EventType::Failed => "failed",
                _ => "done",
            };

            output.push_str(&format!("  {:<14} {:>6} {:>9.2}s\n", end.stage, marker, seconds));
        }

        output
    }

    /// Writes the timeline as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| WrapperError::Timeline {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        fs::write(path, json).map_err(|e| WrapperError::Timeline {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl Default for RunTimeline {
    fn default() -> Self {
        Self::new()
    }
}
