//! Command Facade
//!
//! [`Pigpio`] turns method calls into packets and packets back into typed
//! values. Each operation follows the same steps:
//!
//! 1. Validate arguments locally (no I/O on failure)
//! 2. Build the request packet
//! 3. Exchange it over the transport
//! 4. Negative result → [`Fault`]; otherwise read the command's value field
//!
//! Operations are grouped by peripheral in the submodules.

mod gpio;
mod pwm;
mod i2c;
mod spi;
mod serial;
pub mod limits;

use std::sync::Arc;

use bytes::Bytes;

use limits::check_len;

pub use gpio::{Level, Mode, Pull};
pub use i2c::I2cHandle;
pub use serial::SerialHandle;
pub use spi::SpiHandle;

use crate::config::Config;
use crate::error::Result;
use crate::fault::Fault;
use crate::protocol::{Command, Packet, MAX_EXTENSION_SIZE};
use crate::transport::{Clock, Session, SystemClock, Transport};

/// Typed client for one daemon connection
pub struct Pigpio<T: Transport = Session> {
    transport: T,
    clock: Arc<dyn Clock>,
}

impl Pigpio<Session> {
    /// Open a session to the daemon and wrap it
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self::new(Session::connect(config)?))
    }
}

impl<T: Transport> Pigpio<T> {
    /// Wrap an existing transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used by the delay helpers
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Close the underlying transport
    pub fn close(&self) -> Result<()> {
        self.transport.close()
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    /// Exchange a request and turn a negative result into a fault
    fn call(&self, command: Command, p1: u32, p2: u32) -> Result<Packet> {
        let response = self.transport.exchange(&Packet::request(command, p1, p2))?;
        check(command, response)
    }

    /// As [`call`](Self::call) with an extension attached
    fn call_ext(
        &self,
        command: Command,
        p1: u32,
        p2: u32,
        extension: impl Into<Bytes>,
    ) -> Result<Packet> {
        let extension = extension.into();
        check_len(
            "extension length",
            extension.len(),
            0,
            MAX_EXTENSION_SIZE as usize,
        )?;
        let request = Packet::request_with_extension(command, p1, p2, extension);
        let response = self.transport.exchange(&request)?;
        check(command, response)
    }

    /// Run a command and return its value field
    fn value(&self, command: Command, p1: u32, p2: u32) -> Result<u32> {
        let response = self.call(command, p1, p2)?;
        Ok(response.field(command.value_field()))
    }

    /// Run a command carrying an extension and return its value field
    fn value_ext(
        &self,
        command: Command,
        p1: u32,
        p2: u32,
        extension: impl Into<Bytes>,
    ) -> Result<u32> {
        let response = self.call_ext(command, p1, p2, extension)?;
        Ok(response.field(command.value_field()))
    }

    /// Run a command whose response data rides in the extension
    fn data(&self, command: Command, p1: u32, p2: u32) -> Result<Bytes> {
        Ok(self.call(command, p1, p2)?.extension)
    }

    fn data_ext(
        &self,
        command: Command,
        p1: u32,
        p2: u32,
        extension: impl Into<Bytes>,
    ) -> Result<Bytes> {
        Ok(self.call_ext(command, p1, p2, extension)?.extension)
    }
}

fn check(command: Command, response: Packet) -> Result<Packet> {
    let result = response.result();
    if result < 0 && !command.unsigned_result() {
        tracing::debug!("{} failed with result {}", command, result);
        return Err(Fault::new(command, result).into());
    }
    Ok(response)
}

/// A u32 third argument, carried in the extension as the daemon expects
fn word_extension(value: u32) -> Bytes {
    Bytes::copy_from_slice(&value.to_le_bytes())
}
