//! Run Monitoring Module
//!
//! Stage timing for a wrapper run.

pub mod timeline;

pub use timeline::{EventType, RunTimeline, TimelineEvent};
