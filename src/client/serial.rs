//! Serial port primitives

use bytes::Bytes;

use super::limits::{check_count, check_range, MAX_SERIAL_BAUD, MIN_SERIAL_BAUD};
use super::Pigpio;
use crate::error::{ArgumentError, Result};
use crate::protocol::Command;
use crate::transport::Transport;

/// Daemon handle for an open serial device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerialHandle(pub u32);

impl<T: Transport> Pigpio<T> {
    /// Open a tty such as `/dev/ttyAMA0`; the name travels in the extension
    pub fn serial_open(&self, tty: &str, baud: u32) -> Result<SerialHandle> {
        if tty.is_empty() {
            return Err(ArgumentError {
                name: "tty name length",
                value: 0,
                min: 1,
                max: i64::from(u32::MAX),
            }
            .into());
        }
        check_range("serial baud", baud, MIN_SERIAL_BAUD, MAX_SERIAL_BAUD)?;
        let handle = self.value_ext(
            Command::SerialOpen,
            baud,
            0,
            Bytes::copy_from_slice(tty.as_bytes()),
        )?;
        tracing::debug!("Opened serial {} at {} baud as handle {}", tty, baud, handle);
        Ok(SerialHandle(handle))
    }

    pub fn serial_close(&self, handle: SerialHandle) -> Result<()> {
        self.call(Command::SerialClose, handle.0, 0)?;
        Ok(())
    }

    pub fn serial_read_byte(&self, handle: SerialHandle) -> Result<u8> {
        Ok(self.value(Command::SerialReadByte, handle.0, 0)? as u8)
    }

    pub fn serial_write_byte(&self, handle: SerialHandle, value: u8) -> Result<()> {
        self.call(Command::SerialWriteByte, handle.0, u32::from(value))?;
        Ok(())
    }

    /// Read up to `count` bytes; fewer (or none) if less is buffered
    pub fn serial_read(&self, handle: SerialHandle, count: usize) -> Result<Bytes> {
        let count = check_count("serial read length", count)?;
        self.data(Command::SerialRead, handle.0, count)
    }

    pub fn serial_write(&self, handle: SerialHandle, data: &[u8]) -> Result<()> {
        self.call_ext(Command::SerialWrite, handle.0, 0, Bytes::copy_from_slice(data))?;
        Ok(())
    }

    /// Bytes waiting in the daemon's receive buffer
    pub fn serial_data_available(&self, handle: SerialHandle) -> Result<u32> {
        self.value(Command::SerialDataAvailable, handle.0, 0)
    }
}
