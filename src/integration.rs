//! Integration module for connecting detection backends to the controller.
//!
//! This module provides the detection seam, a replay backend for recorded
//! detections, and the pipeline that runs one control cycle per frame.

mod builder;
mod detector;
mod pipeline;
mod replay;

pub use builder::BoxBuilder;
pub use detector::{DetectionSource, ScriptedSource};
pub use pipeline::{CycleReport, Delivery, RunSummary, TrackingPipeline};
pub use replay::{ReplayError, ReplaySource, parse_frame};
