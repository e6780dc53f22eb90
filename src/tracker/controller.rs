//! Proportional tracking controller with a dead zone and a rate limit.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::command::{Command, Direction};
use crate::tracker::control_state::ControlState;
use crate::tracker::geometry::FrameGeometry;
use crate::tracker::selector::Target;

/// Smallest step worth sending to the actuator, in degrees.
pub const MIN_ROTATE_STEP: f64 = 1.0;

/// Tuning for the [`TrackingController`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    /// Offsets up to this many pixels (inclusive) are left alone.
    pub threshold: u32,
    /// Largest single rotation, in degrees.
    pub max_rotate_step: f64,
    /// Degrees per pixel of offset.
    pub smooth_factor: f64,
    /// Minimum spacing between two commands.
    pub send_interval: Duration,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            threshold: 20,
            max_rotate_step: 10.0,
            smooth_factor: 0.04,
            send_interval: Duration::from_millis(50),
        }
    }
}

/// What the controller made of one cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Nothing was detected this frame.
    NoTarget,
    /// Target close enough to center.
    DeadZone { offset: i64 },
    /// Target off center, but the previous command is too recent.
    RateLimited { offset: i64, elapsed: Duration },
    /// Issue this command.
    Command { offset: i64, command: Command },
}

impl Decision {
    pub fn command(&self) -> Option<&Command> {
        match self {
            Decision::Command { command, .. } => Some(command),
            _ => None,
        }
    }

    pub fn offset(&self) -> Option<i64> {
        match *self {
            Decision::NoTarget => None,
            Decision::DeadZone { offset }
            | Decision::RateLimited { offset, .. }
            | Decision::Command { offset, .. } => Some(offset),
        }
    }
}

/// Map an offset to a rotation magnitude:
/// `clamp(|offset| * smooth_factor, MIN_ROTATE_STEP, max_rotate_step)`.
///
/// If `max_rotate_step` is configured below the floor, the ceiling wins.
pub fn proportional_step(offset: i64, config: &ControlConfig) -> f64 {
    let raw = offset.unsigned_abs() as f64 * config.smooth_factor;
    raw.max(MIN_ROTATE_STEP).min(config.max_rotate_step)
}

/// Rotate counter-clockwise toward targets left of center.
pub fn direction_for(offset: i64) -> Direction {
    if offset < 0 { Direction::Ccw } else { Direction::Cw }
}

/// One control step as a pure transform of `(offset, now, state)`.
///
/// The dead zone is checked before the rate limit; the magnitude is only
/// computed once both pass. The returned state differs from the input only
/// when a command is issued.
pub fn decide(
    config: &ControlConfig,
    offset: Option<i64>,
    now: Instant,
    state: ControlState,
) -> (Decision, ControlState) {
    let Some(offset) = offset else {
        return (Decision::NoTarget, state);
    };

    if offset.unsigned_abs() <= u64::from(config.threshold) {
        return (Decision::DeadZone { offset }, state);
    }

    if let Some(elapsed) = state.elapsed(now) {
        if elapsed < config.send_interval {
            return (Decision::RateLimited { offset, elapsed }, state);
        }
    }

    let command = Command::new(direction_for(offset), proportional_step(offset, config));
    let next = ControlState {
        last_command: Some(now),
    };
    (Decision::Command { offset, command }, next)
}

/// Owns the control state for one control loop run.
#[derive(Debug, Clone)]
pub struct TrackingController {
    config: ControlConfig,
    geometry: FrameGeometry,
    state: ControlState,
}

impl TrackingController {
    pub fn new(config: ControlConfig, geometry: FrameGeometry) -> Self {
        Self {
            config,
            geometry,
            state: ControlState::default(),
        }
    }

    /// Run one control step for the selected target, if any.
    pub fn update(&mut self, target: Option<&Target>, now: Instant) -> Decision {
        let offset = target.map(|t| self.geometry.offset_of(t.center_x));
        let (decision, state) = decide(&self.config, offset, now, self.state);
        self.state = state;

        match &decision {
            Decision::NoTarget => debug!("no target"),
            Decision::DeadZone { offset } => debug!(offset, "target centered"),
            Decision::RateLimited { offset, elapsed } => {
                debug!(offset, elapsed_ms = elapsed.as_millis() as u64, "rate limited")
            }
            Decision::Command { offset, command } => debug!(
                offset,
                direction = %command.direction,
                degrees = command.magnitude_degrees,
                "command issued"
            ),
        }

        decision
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }
}
