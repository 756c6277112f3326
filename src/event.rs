//! Event emission
//!
//! Each (interface, attribute) result becomes one JSON event for the local
//! monitoring agent. Events are sent as newline-terminated UDP datagrams and
//! are fire-and-forget: nothing is retried and no reply is awaited.

use crate::check::CheckStatus;
use crate::error::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::net::{SocketAddr, UdpSocket};
use tracing::{debug, warn};

/// A single check result for the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Check name, e.g. `network-interface-eth0-mtu`
    pub name: String,
    /// Status code (0-3)
    pub status: u8,
    /// Human readable output, prefixed with the status label
    pub output: String,
    /// Handlers the agent should route the event to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handlers: Vec<String>,
}

impl Event {
    /// Build an event with its output prefixed by the status label
    pub fn new(
        name: impl Into<String>,
        status: CheckStatus,
        message: impl AsRef<str>,
        handlers: &[String],
    ) -> Self {
        Self {
            name: name.into(),
            status: status.code(),
            output: format!("{}: {}", status.label(), message.as_ref()),
            handlers: handlers.to_vec(),
        }
    }

    /// Encode as a newline-terminated JSON document
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self).map_err(|e| {
            CheckError::Serialization(format!("Failed to serialize event {}: {}", self.name, e))
        })?;
        line.push('\n');
        Ok(line)
    }
}

/// Destination for check events
pub trait EventSink {
    /// Deliver one event
    fn emit(&mut self, event: &Event) -> Result<()>;
}

/// Collects events in memory
impl EventSink for Vec<Event> {
    fn emit(&mut self, event: &Event) -> Result<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// Sends events to the agent's UDP socket
#[derive(Debug, Clone)]
pub struct UdpSink {
    address: SocketAddr,
}

impl UdpSink {
    /// Create a sink for the agent at `address`
    pub fn new(address: SocketAddr) -> Self {
        Self { address }
    }

    fn send(&self, payload: &[u8]) -> Result<()> {
        let bind: SocketAddr = if self.address.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind)
            .map_err(|e| CheckError::Emit(format!("Failed to open UDP socket: {}", e)))?;
        socket.send_to(payload, self.address).map_err(|e| {
            CheckError::Emit(format!("Failed to send event to {}: {}", self.address, e))
        })?;
        Ok(())
    }
}

impl EventSink for UdpSink {
    fn emit(&mut self, event: &Event) -> Result<()> {
        let line = event.to_line()?;
        match self.send(line.as_bytes()) {
            Ok(()) => debug!("Sent {} to {}", event.name, self.address),
            Err(e) => warn!("{}", e),
        }
        Ok(())
    }
}

/// Writes events to a stream instead of sending them
#[derive(Debug)]
pub struct DryRunSink<W: Write> {
    writer: W,
}

impl<W: Write> DryRunSink<W> {
    /// Create a sink writing to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl DryRunSink<std::io::Stdout> {
    /// Sink printing to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> EventSink for DryRunSink<W> {
    fn emit(&mut self, event: &Event) -> Result<()> {
        let line = event.to_line()?;
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }
}
