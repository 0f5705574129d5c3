//! Serial port

use super::{Readable, Writable};
use crate::client::{Pigpio, SerialHandle};
use crate::error::Result;
use crate::transport::Transport;

/// An open serial device; closed on drop
pub struct SerialPort<'a, T: Transport> {
    client: &'a Pigpio<T>,
    handle: SerialHandle,
    closed: bool,
}

impl<'a, T: Transport> SerialPort<'a, T> {
    pub fn open(client: &'a Pigpio<T>, tty: &str, baud: u32) -> Result<Self> {
        let handle = client.serial_open(tty, baud)?;
        Ok(Self {
            client,
            handle,
            closed: false,
        })
    }

    pub fn handle(&self) -> SerialHandle {
        self.handle
    }

    /// Read whatever is buffered, at most `max` bytes
    pub fn read_bytes(&self, max: usize) -> Result<Vec<u8>> {
        Ok(self.client.serial_read(self.handle, max)?.to_vec())
    }

    pub fn write_bytes(&self, data: &[u8]) -> Result<()> {
        self.client.serial_write(self.handle, data)
    }

    pub fn available(&self) -> Result<u32> {
        self.client.serial_data_available(self.handle)
    }

    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.client.serial_close(self.handle)
    }
}

impl<T: Transport> Readable for SerialPort<'_, T> {
    type Value = u8;

    fn read(&self) -> Result<u8> {
        self.client.serial_read_byte(self.handle)
    }
}

impl<T: Transport> Writable for SerialPort<'_, T> {
    type Value = u8;

    fn write(&self, value: u8) -> Result<()> {
        self.client.serial_write_byte(self.handle, value)
    }
}

impl<T: Transport> Drop for SerialPort<'_, T> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.client.serial_close(self.handle) {
            tracing::warn!("Failed to close serial handle {}: {}", self.handle.0, e);
        }
    }
}
