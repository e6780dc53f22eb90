//! TrackingPipeline for running the control loop over a detection source.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::DetectionSource;
use crate::command::{CommandChannel, Direction, encode};
use crate::error::{RunError, SendError};
use crate::tracker::{BoundingBox, Decision, Target, TrackingController, select_target};

/// What happened to the command of a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The controller issued no command.
    NotAttempted,
    /// Written to the peripheral.
    Sent,
    /// Issued, but no peripheral is connected.
    NoChannel,
    /// The write failed; the command is lost.
    Failed(String),
}

/// Result of one control cycle, for callers that visualize or record.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub frame_index: u64,
    pub target: Option<Target>,
    pub decision: Decision,
    pub delivery: Delivery,
}

/// Counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub frames_with_target: u64,
    pub commands_issued: u64,
    pub commands_delivered: u64,
    pub send_failures: u64,
    pub interrupted: bool,
}

impl RunSummary {
    fn record(&mut self, report: &CycleReport) {
        self.frames += 1;
        if report.target.is_some() {
            self.frames_with_target += 1;
        }
        match report.delivery {
            Delivery::NotAttempted => {}
            Delivery::Sent => {
                self.commands_issued += 1;
                self.commands_delivered += 1;
            }
            Delivery::NoChannel => self.commands_issued += 1,
            Delivery::Failed(_) => {
                self.commands_issued += 1;
                self.send_failures += 1;
            }
        }
    }
}

/// Bundles a detection source, the controller and the command channel.
///
/// One cycle per frame: select target, decide, encode, send.
pub struct TrackingPipeline<D: DetectionSource, P: Write> {
    detector: D,
    controller: TrackingController,
    channel: CommandChannel<P>,
    mirror: bool,
    summary: RunSummary,
}

impl<D: DetectionSource, P: Write> TrackingPipeline<D, P> {
    /// Create a new pipeline. The channel should already be open or absent.
    pub fn new(detector: D, controller: TrackingController, channel: CommandChannel<P>) -> Self {
        Self {
            detector,
            controller,
            channel,
            mirror: false,
            summary: RunSummary::default(),
        }
    }

    /// Flip detections horizontally before selection, for mirrored previews.
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Run a single control cycle on the boxes of one frame.
    ///
    /// Boxes are clipped to the frame width before selection, mirrored or
    /// not, so anything wholly outside the frame is never a target.
    pub fn process_frame(&mut self, boxes: &[BoundingBox], now: Instant) -> CycleReport {
        let geometry = self.controller.geometry();
        let framed: Vec<BoundingBox> = boxes
            .iter()
            .map(|b| {
                if self.mirror {
                    geometry.mirror(b)
                } else {
                    geometry.clip(b)
                }
            })
            .collect();
        let target = select_target(&framed);

        let decision = self.controller.update(target.as_ref(), now);
        let delivery = match &decision {
            Decision::Command { offset, command } => {
                let line = encode(command);
                let side = match command.direction {
                    Direction::Ccw => "Left",
                    Direction::Cw => "Right",
                };
                info!("{} ({}) -> {}", side, offset, line.trim_end());
                self.deliver(&line)
            }
            _ => Delivery::NotAttempted,
        };

        let report = CycleReport {
            frame_index: self.summary.frames,
            target,
            decision,
            delivery,
        };
        self.summary.record(&report);
        report
    }

    fn deliver(&mut self, line: &str) -> Delivery {
        match self.channel.send(line.as_bytes()) {
            Ok(()) => Delivery::Sent,
            Err(SendError::NoChannel) => {
                debug!("No peripheral, command not delivered");
                Delivery::NoChannel
            }
            Err(e) => {
                warn!("Failed to send command to peripheral: {}", e);
                Delivery::Failed(e.to_string())
            }
        }
    }

    /// Poll the detection source until it ends, fails, or `running` is
    /// cleared. The channel is closed before returning on every path.
    ///
    /// # Returns
    /// The run summary on interruption, or the error that stopped the loop.
    pub fn run<F>(&mut self, running: &AtomicBool, mut on_cycle: F) -> Result<RunSummary, RunError>
    where
        F: FnMut(&CycleReport),
    {
        let result = loop {
            if !running.load(Ordering::SeqCst) {
                info!("Interrupted by user");
                self.summary.interrupted = true;
                break Ok(self.summary);
            }

            let boxes = match self.detector.next_detections() {
                Ok(Some(boxes)) => boxes,
                Ok(None) => {
                    break Err(RunError::SourceExhausted {
                        frames: self.summary.frames,
                    });
                }
                Err(e) => {
                    break Err(RunError::Acquisition {
                        frames: self.summary.frames,
                        reason: e.to_string(),
                    });
                }
            };

            let report = self.process_frame(&boxes, Instant::now());
            on_cycle(&report);
        };

        self.shutdown();
        result
    }

    /// Release the peripheral. Idempotent.
    pub fn shutdown(&mut self) {
        self.channel.close();
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a reference to the controller.
    pub fn controller(&self) -> &TrackingController {
        &self.controller
    }

    /// Get a reference to the command channel.
    pub fn channel(&self) -> &CommandChannel<P> {
        &self.channel
    }
}
