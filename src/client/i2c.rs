//! I2C / SMBus primitives
//!
//! Handle-based calls mapping one-to-one onto daemon commands. Register
//! level helpers live in [`crate::device::I2cDevice`].

use bytes::Bytes;

use super::limits::{check_count, check_len, check_range, MAX_I2C_ADDRESS, MAX_I2C_BLOCK_LEN};
use super::{word_extension, Pigpio};
use crate::error::Result;
use crate::protocol::Command;
use crate::transport::Transport;

/// Daemon handle for an open I2C device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct I2cHandle(pub u32);

impl<T: Transport> Pigpio<T> {
    /// Open the device at `address` on `bus`
    pub fn i2c_open(&self, bus: u32, address: u32) -> Result<I2cHandle> {
        check_range("i2c address", address, 0, MAX_I2C_ADDRESS)?;
        // No open flags are currently defined
        let handle = self.value_ext(Command::I2cOpen, bus, address, word_extension(0))?;
        tracing::debug!("Opened I2C bus {} address 0x{:02x} as handle {}", bus, address, handle);
        Ok(I2cHandle(handle))
    }

    pub fn i2c_close(&self, handle: I2cHandle) -> Result<()> {
        self.call(Command::I2cClose, handle.0, 0)?;
        Ok(())
    }

    /// SMBus quick command: the R/W bit alone
    pub fn i2c_write_quick(&self, handle: I2cHandle, bit: bool) -> Result<()> {
        self.call(Command::I2cWriteQuick, handle.0, u32::from(bit))?;
        Ok(())
    }

    // =========================================================================
    // Single bytes
    // =========================================================================

    pub fn i2c_read_byte(&self, handle: I2cHandle) -> Result<u8> {
        Ok(self.value(Command::I2cReadByte, handle.0, 0)? as u8)
    }

    pub fn i2c_write_byte(&self, handle: I2cHandle, value: u8) -> Result<()> {
        self.call(Command::I2cWriteByte, handle.0, u32::from(value))?;
        Ok(())
    }

    // =========================================================================
    // Register access
    // =========================================================================

    pub fn i2c_read_byte_data(&self, handle: I2cHandle, register: u8) -> Result<u8> {
        Ok(self.value(Command::I2cReadByteData, handle.0, u32::from(register))? as u8)
    }

    pub fn i2c_write_byte_data(&self, handle: I2cHandle, register: u8, value: u8) -> Result<()> {
        self.call_ext(
            Command::I2cWriteByteData,
            handle.0,
            u32::from(register),
            word_extension(u32::from(value)),
        )?;
        Ok(())
    }

    /// SMBus word read (device byte order, low byte first)
    pub fn i2c_read_word_data(&self, handle: I2cHandle, register: u8) -> Result<u16> {
        Ok(self.value(Command::I2cReadWordData, handle.0, u32::from(register))? as u16)
    }

    pub fn i2c_write_word_data(&self, handle: I2cHandle, register: u8, value: u16) -> Result<()> {
        self.call_ext(
            Command::I2cWriteWordData,
            handle.0,
            u32::from(register),
            word_extension(u32::from(value)),
        )?;
        Ok(())
    }

    /// Write a word and read the device's reply in one SMBus transaction
    pub fn i2c_process_call(&self, handle: I2cHandle, register: u8, value: u16) -> Result<u16> {
        let reply = self.value_ext(
            Command::I2cProcessCall,
            handle.0,
            u32::from(register),
            word_extension(u32::from(value)),
        )?;
        Ok(reply as u16)
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    /// SMBus block read; the device decides the length (up to 32)
    pub fn i2c_read_block_data(&self, handle: I2cHandle, register: u8) -> Result<Bytes> {
        self.data(Command::I2cReadBlockData, handle.0, u32::from(register))
    }

    /// SMBus block write (length byte sent by the daemon)
    pub fn i2c_write_block_data(&self, handle: I2cHandle, register: u8, data: &[u8]) -> Result<()> {
        check_len("i2c block length", data.len(), 1, MAX_I2C_BLOCK_LEN)?;
        self.call_ext(
            Command::I2cWriteBlockData,
            handle.0,
            u32::from(register),
            Bytes::copy_from_slice(data),
        )?;
        Ok(())
    }

    /// Read `count` bytes starting at `register`, no length byte on the bus
    pub fn i2c_read_i2c_block_data(
        &self,
        handle: I2cHandle,
        register: u8,
        count: usize,
    ) -> Result<Bytes> {
        check_len("i2c block length", count, 1, MAX_I2C_BLOCK_LEN)?;
        self.data_ext(
            Command::I2cReadI2cBlockData,
            handle.0,
            u32::from(register),
            word_extension(check_count("i2c block length", count)?),
        )
    }

    /// Write bytes starting at `register`, no length byte on the bus
    pub fn i2c_write_i2c_block_data(
        &self,
        handle: I2cHandle,
        register: u8,
        data: &[u8],
    ) -> Result<()> {
        check_len("i2c block length", data.len(), 1, MAX_I2C_BLOCK_LEN)?;
        self.call_ext(
            Command::I2cWriteI2cBlockData,
            handle.0,
            u32::from(register),
            Bytes::copy_from_slice(data),
        )?;
        Ok(())
    }

    // =========================================================================
    // Raw device transfers
    // =========================================================================

    pub fn i2c_read_device(&self, handle: I2cHandle, count: usize) -> Result<Bytes> {
        let count = check_count("i2c read length", count)?;
        self.data(Command::I2cReadDevice, handle.0, count)
    }

    pub fn i2c_write_device(&self, handle: I2cHandle, data: &[u8]) -> Result<()> {
        self.call_ext(Command::I2cWriteDevice, handle.0, 0, Bytes::copy_from_slice(data))?;
        Ok(())
    }
}
