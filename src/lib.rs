//! Closed-loop camera mount tracking.
//!
//! Detected bounding boxes come in once per frame; the largest is picked as
//! the target and its horizontal offset from the frame center is turned into
//! a rate-limited, magnitude-bounded rotation command. Commands go out as
//! ASCII lines (`"CW 5.2\n"`) over a best-effort channel that may have no
//! peripheral behind it at all.

pub mod command;
pub mod config;
pub mod error;
pub mod integration;
pub mod tracker;

pub use command::{Command, CommandChannel, Connector, Direction};
pub use config::Config;
pub use error::{AutotrackError, Result};
pub use integration::{DetectionSource, TrackingPipeline};
pub use tracker::{
    BoundingBox, ControlConfig, Decision, FrameGeometry, Target, TrackingController,
};

/// Crate name, for logs.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Crate version, for logs.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
