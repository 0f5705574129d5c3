//! SPI primitives

use bytes::Bytes;

use super::limits::{check_count, check_range, MAX_SPI_BAUD, MAX_SPI_CHANNEL, MIN_SPI_BAUD};
use super::{word_extension, Pigpio};
use crate::error::Result;
use crate::protocol::Command;
use crate::transport::Transport;

/// Daemon handle for an open SPI channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpiHandle(pub u32);

impl<T: Transport> Pigpio<T> {
    /// Open chip-select `channel` at `baud` bits per second.
    ///
    /// `flags` is the daemon's SPI flag word (mode, CS polarity, aux bus...).
    pub fn spi_open(&self, channel: u32, baud: u32, flags: u32) -> Result<SpiHandle> {
        check_range("spi channel", channel, 0, MAX_SPI_CHANNEL)?;
        check_range("spi baud", baud, MIN_SPI_BAUD, MAX_SPI_BAUD)?;
        let handle = self.value_ext(Command::SpiOpen, channel, baud, word_extension(flags))?;
        tracing::debug!("Opened SPI channel {} at {} baud as handle {}", channel, baud, handle);
        Ok(SpiHandle(handle))
    }

    pub fn spi_close(&self, handle: SpiHandle) -> Result<()> {
        self.call(Command::SpiClose, handle.0, 0)?;
        Ok(())
    }

    pub fn spi_read(&self, handle: SpiHandle, count: usize) -> Result<Bytes> {
        let count = check_count("spi read length", count)?;
        self.data(Command::SpiRead, handle.0, count)
    }

    /// Returns the number of bytes written
    pub fn spi_write(&self, handle: SpiHandle, data: &[u8]) -> Result<usize> {
        let written = self.value_ext(Command::SpiWrite, handle.0, 0, Bytes::copy_from_slice(data))?;
        Ok(written as usize)
    }

    /// Full-duplex transfer; the reply has the same length as `data`
    pub fn spi_xfer(&self, handle: SpiHandle, data: &[u8]) -> Result<Bytes> {
        self.data_ext(Command::SpiXfer, handle.0, 0, Bytes::copy_from_slice(data))
    }
}
