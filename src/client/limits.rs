//! Argument bounds
//!
//! Every bound is inclusive and mirrors the daemon's documented limits.
//! Checks run before any packet is built.

use crate::error::{ArgumentError, Result};

/// Highest addressable Broadcom GPIO
pub const MAX_GPIO: u32 = 53;

/// Highest GPIO considered safe for general application use
pub const MAX_USER_GPIO: u32 = 31;

/// Smallest settable PWM duty-cycle range
pub const MIN_DUTYCYCLE_RANGE: u32 = 25;

/// Largest settable PWM duty-cycle range (and largest duty cycle)
pub const MAX_DUTYCYCLE_RANGE: u32 = 40_000;

/// Longest busy-wait delay in microseconds
pub const MAX_MICS_DELAY: u32 = 1_000_000;

/// Longest delay in milliseconds
pub const MAX_MILS_DELAY: u32 = 60_000;

/// Trigger pulse length bounds in microseconds
pub const MIN_TRIGGER_PULSELEN: u32 = 1;
pub const MAX_TRIGGER_PULSELEN: u32 = 100;

/// Highest 7-bit I2C address
pub const MAX_I2C_ADDRESS: u32 = 0x7F;

/// SMBus block transfers carry at most this many bytes
pub const MAX_I2C_BLOCK_LEN: usize = 32;

/// Highest SPI chip-select channel (auxiliary SPI has three)
pub const MAX_SPI_CHANNEL: u32 = 2;

/// SPI clock bounds in bits per second
pub const MIN_SPI_BAUD: u32 = 32_000;
pub const MAX_SPI_BAUD: u32 = 125_000_000;

/// Serial baud bounds
pub const MIN_SERIAL_BAUD: u32 = 50;
pub const MAX_SERIAL_BAUD: u32 = 250_000;

pub(crate) fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<u32> {
    if value < min || value > max {
        return Err(ArgumentError {
            name,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        }
        .into());
    }
    Ok(value)
}

pub(crate) fn check_len(name: &'static str, len: usize, min: usize, max: usize) -> Result<usize> {
    if len < min || len > max {
        return Err(ArgumentError {
            name,
            value: len as i64,
            min: min as i64,
            max: max as i64,
        }
        .into());
    }
    Ok(len)
}

/// A byte count that must fit the wire's 32-bit parameter slot
pub(crate) fn check_count(name: &'static str, count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| {
        ArgumentError {
            name,
            value: i64::try_from(count).unwrap_or(i64::MAX),
            min: 0,
            max: i64::from(u32::MAX),
        }
        .into()
    })
}

/// Any addressable GPIO
pub fn check_gpio(pin: u32) -> Result<u32> {
    check_range("gpio", pin, 0, MAX_GPIO)
}

/// A GPIO from the user-safe subset
pub fn check_user_gpio(pin: u32) -> Result<u32> {
    check_range("user gpio", pin, 0, MAX_USER_GPIO)
}

pub fn check_duty_cycle(duty: u32) -> Result<u32> {
    check_range("duty cycle", duty, 0, MAX_DUTYCYCLE_RANGE)
}

pub fn check_duty_cycle_range(range: u32) -> Result<u32> {
    check_range("duty cycle range", range, MIN_DUTYCYCLE_RANGE, MAX_DUTYCYCLE_RANGE)
}

pub fn check_micros_delay(micros: u32) -> Result<u32> {
    check_range("delay (us)", micros, 0, MAX_MICS_DELAY)
}

pub fn check_millis_delay(millis: u32) -> Result<u32> {
    check_range("delay (ms)", millis, 0, MAX_MILS_DELAY)
}

pub fn check_trigger_pulse(micros: u32) -> Result<u32> {
    check_range(
        "trigger pulse (us)",
        micros,
        MIN_TRIGGER_PULSELEN,
        MAX_TRIGGER_PULSELEN,
    )
}

/// Validate `offset..offset + len` against a buffer of `capacity` bytes
pub fn check_span(offset: usize, len: usize, capacity: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(ArgumentError {
            name: "buffer offset + length",
            value: offset.saturating_add(len) as i64,
            min: 0,
            max: capacity as i64,
        }
        .into()),
    }
}
