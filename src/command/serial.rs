//! Serial port transport for the actuator peripheral.

use std::thread;
use std::time::Duration;

use serialport::SerialPort;
use tracing::debug;

use super::Connector;
use crate::error::ChannelError;

/// Opens a serial port with a bounded write timeout.
///
/// Microcontroller boards commonly reset when the port opens, so the
/// connector waits `settle` before handing the port over.
#[derive(Debug, Clone)]
pub struct SerialConnector {
    pub port: String,
    pub baud_rate: u32,
    pub timeout: Duration,
    pub settle: Duration,
}

impl SerialConnector {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
            timeout: Duration::from_millis(100),
            settle: Duration::from_secs(2),
        }
    }

    /// Set the write timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the post-open settle delay.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

impl Connector for SerialConnector {
    type Port = Box<dyn SerialPort>;

    fn connect(&self) -> Result<Self::Port, ChannelError> {
        let port = serialport::new(self.port.as_str(), self.baud_rate)
            .timeout(self.timeout)
            .open()
            .map_err(|e| ChannelError::Unavailable {
                port: self.port.clone(),
                reason: e.to_string(),
            })?;

        if !self.settle.is_zero() {
            debug!("Waiting {:?} for peripheral to settle", self.settle);
            thread::sleep(self.settle);
        }

        Ok(port)
    }

    fn describe(&self) -> String {
        format!("{} @ {} baud", self.port, self.baud_rate)
    }
}
