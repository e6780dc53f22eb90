//! Best-effort command channel to the actuator peripheral.

use std::io::Write;

use tracing::{info, warn};

use crate::error::{ChannelError, SendError};

/// Opens the byte stream to the peripheral.
///
/// Implement this to plug in a transport (serial port, TCP bridge, a mock).
pub trait Connector {
    /// Writable handle produced on success.
    type Port: Write;

    /// Try to reach the peripheral. Must fail fast rather than block.
    fn connect(&self) -> Result<Self::Port, ChannelError>;

    /// Human-readable endpoint name for logs.
    fn describe(&self) -> String;
}

/// Lifecycle of the channel.
///
/// `Unopened -> {Open, Absent} -> Closed`. `Closed` is terminal.
#[derive(Debug, Default)]
pub enum ChannelState<P> {
    #[default]
    Unopened,
    Open(P),
    /// No peripheral; commands are computed but not delivered.
    Absent,
    Closed,
}

impl<P> ChannelState<P> {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelState::Unopened => "unopened",
            ChannelState::Open(_) => "open",
            ChannelState::Absent => "absent",
            ChannelState::Closed => "closed",
        }
    }
}

/// Owns the connection handle. Closing happens on drop as well, so the
/// port is released on every exit path.
#[derive(Debug)]
pub struct CommandChannel<P: Write> {
    state: ChannelState<P>,
}

impl<P: Write> Default for CommandChannel<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Write> CommandChannel<P> {
    pub fn new() -> Self {
        Self {
            state: ChannelState::Unopened,
        }
    }

    /// Open through `connector`, falling back to absent mode on failure.
    pub fn connect<C>(connector: &C) -> Self
    where
        C: Connector<Port = P>,
    {
        let mut channel = Self::new();
        if let Err(e) = channel.open(connector) {
            warn!("Could not connect to peripheral: {}", e);
            info!("Continuing without peripheral connection");
        }
        channel
    }

    /// Attempt to open the channel. Only valid from `Unopened`.
    ///
    /// On connect failure the channel becomes `Absent` and the error is
    /// handed back for reporting only.
    pub fn open<C>(&mut self, connector: &C) -> Result<(), ChannelError>
    where
        C: Connector<Port = P>,
    {
        if !matches!(self.state, ChannelState::Unopened) {
            return Err(ChannelError::InvalidState(self.state.name()));
        }

        match connector.connect() {
            Ok(port) => {
                info!("Connected to peripheral on {}", connector.describe());
                self.state = ChannelState::Open(port);
                Ok(())
            }
            Err(e) => {
                self.state = ChannelState::Absent;
                Err(e)
            }
        }
    }

    /// Run without hardware. No effect unless the channel is unopened.
    pub fn disable(&mut self) {
        if matches!(self.state, ChannelState::Unopened) {
            info!("Peripheral disabled, commands will not be delivered");
            self.state = ChannelState::Absent;
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ChannelState::Open(_))
    }

    pub fn state(&self) -> &ChannelState<P> {
        &self.state
    }

    /// Write one encoded command. Never retries.
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), SendError> {
        match &mut self.state {
            ChannelState::Open(port) => {
                port.write_all(bytes)?;
                port.flush()?;
                Ok(())
            }
            ChannelState::Unopened | ChannelState::Absent => Err(SendError::NoChannel),
            ChannelState::Closed => Err(SendError::Closed),
        }
    }

    /// Release the port. Safe to call any number of times.
    pub fn close(&mut self) {
        match std::mem::replace(&mut self.state, ChannelState::Closed) {
            ChannelState::Open(mut port) => {
                if let Err(e) = port.flush() {
                    warn!("Flush on close failed: {}", e);
                }
                drop(port);
                info!("Peripheral connection closed");
            }
            ChannelState::Unopened | ChannelState::Absent | ChannelState::Closed => {}
        }
    }
}

impl<P: Write> Drop for CommandChannel<P> {
    fn drop(&mut self) {
        self.close();
    }
}
