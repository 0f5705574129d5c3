//! GPIO, daemon info and delay operations

use std::fmt;
use std::time::Duration;

use super::limits::{
    check_gpio, check_micros_delay, check_millis_delay, check_trigger_pulse, check_user_gpio,
};
use super::{word_extension, Pigpio};
use crate::error::{Error, Result};
use crate::protocol::Command;
use crate::transport::Transport;

/// GPIO function select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Mode {
    Input = 0,
    Output = 1,
    Alt0 = 4,
    Alt1 = 5,
    Alt2 = 6,
    Alt3 = 7,
    Alt4 = 3,
    Alt5 = 2,
}

impl Mode {
    pub fn from_raw(raw: u32) -> Option<Mode> {
        match raw {
            0 => Some(Mode::Input),
            1 => Some(Mode::Output),
            2 => Some(Mode::Alt5),
            3 => Some(Mode::Alt4),
            4 => Some(Mode::Alt0),
            5 => Some(Mode::Alt1),
            6 => Some(Mode::Alt2),
            7 => Some(Mode::Alt3),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        self as u32
    }
}

/// Internal pull resistor setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Pull {
    Off = 0,
    Down = 1,
    Up = 2,
}

impl Pull {
    pub fn raw(self) -> u32 {
        self as u32
    }
}

/// Digital pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Level {
    Low = 0,
    High = 1,
}

impl Level {
    pub fn from_raw(raw: u32) -> Option<Level> {
        match raw {
            0 => Some(Level::Low),
            1 => Some(Level::High),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        self as u32
    }

    /// The opposite level
    pub fn toggled(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(value: Level) -> Self {
        matches!(value, Level::High)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("low"),
            Level::High => f.write_str("high"),
        }
    }
}

impl<T: Transport> Pigpio<T> {
    // =========================================================================
    // Daemon information
    // =========================================================================

    /// Daemon version
    pub fn version(&self) -> Result<u32> {
        self.value(Command::Version, 0, 0)
    }

    /// Board hardware revision
    ///
    /// A zero revision means the daemon could not determine it and is
    /// reported as an error rather than returned.
    pub fn hardware_revision(&self) -> Result<u32> {
        let revision = self.value(Command::HardwareRevision, 0, 0)?;
        if revision == 0 {
            return Err(Error::UnexpectedResult {
                command: Command::HardwareRevision,
                result: 0,
                reason: "hardware revision could not be determined",
            });
        }
        Ok(revision)
    }

    /// Microseconds since the daemon booted (wraps every ~72 minutes)
    pub fn tick(&self) -> Result<u32> {
        self.value(Command::Tick, 0, 0)
    }

    // =========================================================================
    // Pin configuration
    // =========================================================================

    pub fn set_mode(&self, pin: u32, mode: Mode) -> Result<()> {
        check_gpio(pin)?;
        self.call(Command::SetMode, pin, mode.raw())?;
        Ok(())
    }

    pub fn get_mode(&self, pin: u32) -> Result<Mode> {
        check_gpio(pin)?;
        let raw = self.value(Command::GetMode, pin, 0)?;
        Mode::from_raw(raw).ok_or(Error::UnexpectedResult {
            command: Command::GetMode,
            result: raw as i32,
            reason: "unknown mode value",
        })
    }

    pub fn set_pull_up_down(&self, pin: u32, pull: Pull) -> Result<()> {
        check_gpio(pin)?;
        self.call(Command::SetPullUpDown, pin, pull.raw())?;
        Ok(())
    }

    // =========================================================================
    // Digital I/O
    // =========================================================================

    pub fn read(&self, pin: u32) -> Result<Level> {
        check_gpio(pin)?;
        let raw = self.value(Command::Read, pin, 0)?;
        Level::from_raw(raw).ok_or(Error::UnexpectedResult {
            command: Command::Read,
            result: raw as i32,
            reason: "level is neither 0 nor 1",
        })
    }

    pub fn write(&self, pin: u32, level: Level) -> Result<()> {
        check_gpio(pin)?;
        self.call(Command::Write, pin, level.raw())?;
        Ok(())
    }

    /// Send a pulse of `pulse_us` microseconds at `level`
    pub fn trigger(&self, pin: u32, pulse_us: u32, level: Level) -> Result<()> {
        check_user_gpio(pin)?;
        check_trigger_pulse(pulse_us)?;
        self.call_ext(Command::Trigger, pin, pulse_us, word_extension(level.raw()))?;
        Ok(())
    }

    // =========================================================================
    // Bank operations (bit n = GPIO n, or n + 32 for bank 2)
    // =========================================================================

    /// Levels of GPIO 0-31
    pub fn read_bank1(&self) -> Result<u32> {
        self.value(Command::ReadBank1, 0, 0)
    }

    /// Levels of GPIO 32-53
    pub fn read_bank2(&self) -> Result<u32> {
        self.value(Command::ReadBank2, 0, 0)
    }

    pub fn set_bank1(&self, mask: u32) -> Result<()> {
        self.call(Command::SetBank1, mask, 0)?;
        Ok(())
    }

    pub fn set_bank2(&self, mask: u32) -> Result<()> {
        self.call(Command::SetBank2, mask, 0)?;
        Ok(())
    }

    pub fn clear_bank1(&self, mask: u32) -> Result<()> {
        self.call(Command::ClearBank1, mask, 0)?;
        Ok(())
    }

    pub fn clear_bank2(&self, mask: u32) -> Result<()> {
        self.call(Command::ClearBank2, mask, 0)?;
        Ok(())
    }

    // =========================================================================
    // Delays (local, no daemon round trip)
    // =========================================================================

    pub fn delay_micros(&self, micros: u32) -> Result<()> {
        check_micros_delay(micros)?;
        self.clock.sleep(Duration::from_micros(u64::from(micros)));
        Ok(())
    }

    pub fn delay_millis(&self, millis: u32) -> Result<()> {
        check_millis_delay(millis)?;
        self.clock.sleep(Duration::from_millis(u64::from(millis)));
        Ok(())
    }
}
