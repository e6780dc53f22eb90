//! Wire format for actuator commands.
//!
//! One ASCII line per command: `"<CW|CCW> <degrees>\n"`, degrees with exactly
//! one fractional digit and a `.` separator. No checksum and no reply.

use crate::command::message::{Command, Direction};
use crate::error::CodecError;

/// Round to tenths, half away from zero. The sign is carried by the
/// direction, so only the absolute magnitude is encoded.
fn to_tenths(magnitude: f64) -> u64 {
    // NaN casts to 0 and infinity saturates.
    (magnitude.abs() * 10.0).round() as u64
}

/// Serialize a command into its wire line, newline included.
pub fn encode(command: &Command) -> String {
    let tenths = to_tenths(command.magnitude_degrees);
    format!("{} {}.{}\n", command.direction, tenths / 10, tenths % 10)
}

/// Parse one wire line. Trailing `\n` or `\r\n` is accepted.
pub fn decode(line: &str) -> Result<Command, CodecError> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    let mut parts = trimmed.split_whitespace();
    let (Some(direction), Some(magnitude), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(CodecError::Malformed(line.to_string()));
    };

    let direction = match direction {
        "CW" => Direction::Cw,
        "CCW" => Direction::Ccw,
        other => return Err(CodecError::UnknownDirection(other.to_string())),
    };

    let magnitude_degrees: f64 = magnitude
        .parse()
        .map_err(|_| CodecError::InvalidMagnitude(magnitude.to_string()))?;
    if !magnitude_degrees.is_finite() || magnitude_degrees < 0.0 {
        return Err(CodecError::InvalidMagnitude(magnitude.to_string()));
    }

    Ok(Command::new(direction, magnitude_degrees))
}
