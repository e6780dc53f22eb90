//! Actuator commands: wire codec and delivery channel.

mod channel;
mod codec;
mod message;

pub use channel::{ChannelState, CommandChannel, Connector};
pub use codec::{decode, encode};
pub use message::{Command, Direction};

#[cfg(feature = "serial")]
mod serial;

#[cfg(feature = "serial")]
pub use serial::SerialConnector;
