use std::fmt;

/// Rotation direction of the camera mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Clockwise, toward targets right of center
    Cw,
    /// Counter-clockwise, toward targets left of center
    Ccw,
}

impl Direction {
    /// Token used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Cw => "CW",
            Direction::Ccw => "CCW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rotation request for the actuator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    pub direction: Direction,
    pub magnitude_degrees: f64,
}

impl Command {
    pub fn new(direction: Direction, magnitude_degrees: f64) -> Self {
        Self {
            direction,
            magnitude_degrees,
        }
    }
}
