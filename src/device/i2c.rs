//! I2C device with register helpers
//!
//! Byte, word and block register access built from the facade's I2C
//! primitives. The helpers only add buffer bounds checks; everything else
//! is validated (and reported) by the primitive they delegate to.

use super::{Readable, Writable};
use crate::client::limits::check_span;
use crate::client::{I2cHandle, Pigpio};
use crate::error::{Error, Result};
use crate::protocol::Command;
use crate::transport::Transport;

/// An open I2C device; closed on drop
pub struct I2cDevice<'a, T: Transport> {
    client: &'a Pigpio<T>,
    handle: I2cHandle,
    bus: u32,
    address: u32,
    closed: bool,
}

impl<'a, T: Transport> I2cDevice<'a, T> {
    pub fn open(client: &'a Pigpio<T>, bus: u32, address: u32) -> Result<Self> {
        let handle = client.i2c_open(bus, address)?;
        Ok(Self {
            client,
            handle,
            bus,
            address,
            closed: false,
        })
    }

    pub fn handle(&self) -> I2cHandle {
        self.handle
    }

    pub fn bus(&self) -> u32 {
        self.bus
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    // =========================================================================
    // Byte / word registers
    // =========================================================================

    pub fn write_byte_register(&self, register: u8, value: u8) -> Result<()> {
        self.client.i2c_write_byte_data(self.handle, register, value)
    }

    pub fn read_byte_register(&self, register: u8) -> Result<u8> {
        self.client.i2c_read_byte_data(self.handle, register)
    }

    /// Write a 16-bit value as two bytes, high byte first
    pub fn write_word_register(&self, register: u8, value: u16) -> Result<()> {
        self.client
            .i2c_write_i2c_block_data(self.handle, register, &value.to_be_bytes())
    }

    /// Read two bytes starting at `register`, high byte first
    pub fn read_word_register(&self, register: u8) -> Result<u16> {
        let data = self.client.i2c_read_i2c_block_data(self.handle, register, 2)?;
        match data[..] {
            [high, low] => Ok(u16::from_be_bytes([high, low])),
            _ => Err(Error::UnexpectedResult {
                command: Command::I2cReadI2cBlockData,
                result: data.len() as i32,
                reason: "expected two bytes for a word register",
            }),
        }
    }

    /// Write a word and return the device's reply in a single transaction
    ///
    /// Uses the SMBus process call, so no other bus traffic can slip in
    /// between the write and the read.
    pub fn exchange_word(&self, register: u8, value: u16) -> Result<u16> {
        self.client.i2c_process_call(self.handle, register, value)
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    /// Write all of `data` starting at `register`; returns bytes written
    pub fn write_block(&self, register: u8, data: &[u8]) -> Result<usize> {
        self.write_block_range(register, data, 0, data.len())
    }

    /// Write `buffer[offset..offset + len]` starting at `register`
    pub fn write_block_range(
        &self,
        register: u8,
        buffer: &[u8],
        offset: usize,
        len: usize,
    ) -> Result<usize> {
        check_span(offset, len, buffer.len())?;
        self.client
            .i2c_write_i2c_block_data(self.handle, register, &buffer[offset..offset + len])?;
        Ok(len)
    }

    /// Read `len` bytes starting at `register`
    pub fn read_block(&self, register: u8, len: usize) -> Result<Vec<u8>> {
        let data = self.client.i2c_read_i2c_block_data(self.handle, register, len)?;
        Ok(data.to_vec())
    }

    /// Read up to `len` bytes into `buffer[offset..]`; returns bytes read
    pub fn read_block_into(
        &self,
        register: u8,
        buffer: &mut [u8],
        offset: usize,
        len: usize,
    ) -> Result<usize> {
        check_span(offset, len, buffer.len())?;
        let data = self.client.i2c_read_i2c_block_data(self.handle, register, len)?;
        let count = data.len().min(len);
        buffer[offset..offset + count].copy_from_slice(&data[..count]);
        Ok(count)
    }

    // =========================================================================
    // Raw device transfers
    // =========================================================================

    pub fn read_bytes(&self, len: usize) -> Result<Vec<u8>> {
        Ok(self.client.i2c_read_device(self.handle, len)?.to_vec())
    }

    pub fn write_bytes(&self, data: &[u8]) -> Result<()> {
        self.client.i2c_write_device(self.handle, data)
    }

    /// Release the daemon handle
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.client.i2c_close(self.handle)
    }
}

impl<T: Transport> Readable for I2cDevice<'_, T> {
    type Value = u8;

    fn read(&self) -> Result<u8> {
        self.client.i2c_read_byte(self.handle)
    }
}

impl<T: Transport> Writable for I2cDevice<'_, T> {
    type Value = u8;

    fn write(&self, value: u8) -> Result<()> {
        self.client.i2c_write_byte(self.handle, value)
    }
}

impl<T: Transport> Drop for I2cDevice<'_, T> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.client.i2c_close(self.handle) {
            tracing::warn!(
                "Failed to close I2C device 0x{:02x} on bus {}: {}",
                self.address,
                self.bus,
                e
            );
        }
    }
}
