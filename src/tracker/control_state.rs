use std::time::{Duration, Instant};

/// Control state carried between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    /// When the last command was issued. `None` until the first one.
    pub last_command: Option<Instant>,
}

impl ControlState {
    /// Time since the last command, or `None` if nothing was ever sent.
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.last_command
            .map(|sent| now.saturating_duration_since(sent))
    }
}
