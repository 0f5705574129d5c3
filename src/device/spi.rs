//! SPI device

use crate::client::{Pigpio, SpiHandle};
use crate::error::Result;
use crate::transport::Transport;

/// An open SPI channel; closed on drop
pub struct SpiDevice<'a, T: Transport> {
    client: &'a Pigpio<T>,
    handle: SpiHandle,
    closed: bool,
}

impl<'a, T: Transport> SpiDevice<'a, T> {
    pub fn open(client: &'a Pigpio<T>, channel: u32, baud: u32, flags: u32) -> Result<Self> {
        let handle = client.spi_open(channel, baud, flags)?;
        Ok(Self {
            client,
            handle,
            closed: false,
        })
    }

    pub fn handle(&self) -> SpiHandle {
        self.handle
    }

    pub fn read_bytes(&self, len: usize) -> Result<Vec<u8>> {
        Ok(self.client.spi_read(self.handle, len)?.to_vec())
    }

    pub fn write_bytes(&self, data: &[u8]) -> Result<usize> {
        self.client.spi_write(self.handle, data)
    }

    /// Clock `data` out while clocking the same number of bytes in
    pub fn transfer(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.client.spi_xfer(self.handle, data)?.to_vec())
    }

    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.client.spi_close(self.handle)
    }
}

impl<T: Transport> Drop for SpiDevice<'_, T> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.client.spi_close(self.handle) {
            tracing::warn!("Failed to close SPI handle {}: {}", self.handle.0, e);
        }
    }
}
