//! Digital pins

use super::{Readable, StateHolder, Writable};
use crate::client::{Level, Mode, Pigpio, Pull};
use crate::error::Result;
use crate::transport::Transport;

/// A GPIO configured as an output
pub struct DigitalOutput<'a, T: Transport> {
    client: &'a Pigpio<T>,
    pin: u32,
}

impl<'a, T: Transport> DigitalOutput<'a, T> {
    /// Switch `pin` to output mode and drive it to `initial`
    pub fn new(client: &'a Pigpio<T>, pin: u32, initial: Level) -> Result<Self> {
        client.set_mode(pin, Mode::Output)?;
        client.write(pin, initial)?;
        Ok(Self { client, pin })
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn high(&self) -> Result<()> {
        self.client.write(self.pin, Level::High)
    }

    pub fn low(&self) -> Result<()> {
        self.client.write(self.pin, Level::Low)
    }

    /// Flip the level; returns the new level
    pub fn toggle(&self) -> Result<Level> {
        let next = self.client.read(self.pin)?.toggled();
        self.client.write(self.pin, next)?;
        Ok(next)
    }

    /// Drive the pin for `pulse_us` microseconds at `level`
    pub fn pulse(&self, pulse_us: u32, level: Level) -> Result<()> {
        self.client.trigger(self.pin, pulse_us, level)
    }
}

impl<T: Transport> Writable for DigitalOutput<'_, T> {
    type Value = Level;

    fn write(&self, value: Level) -> Result<()> {
        self.client.write(self.pin, value)
    }
}

impl<T: Transport> StateHolder for DigitalOutput<'_, T> {
    type State = Level;

    fn state(&self) -> Result<Level> {
        self.client.read(self.pin)
    }
}

/// A GPIO configured as an input
pub struct DigitalInput<'a, T: Transport> {
    client: &'a Pigpio<T>,
    pin: u32,
}

impl<'a, T: Transport> DigitalInput<'a, T> {
    /// Switch `pin` to input mode with the given pull resistor
    pub fn new(client: &'a Pigpio<T>, pin: u32, pull: Pull) -> Result<Self> {
        client.set_mode(pin, Mode::Input)?;
        client.set_pull_up_down(pin, pull)?;
        Ok(Self { client, pin })
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn is_high(&self) -> Result<bool> {
        Ok(self.client.read(self.pin)? == Level::High)
    }
}

impl<T: Transport> Readable for DigitalInput<'_, T> {
    type Value = Level;

    fn read(&self) -> Result<Level> {
        self.client.read(self.pin)
    }
}

impl<T: Transport> StateHolder for DigitalInput<'_, T> {
    type State = Mode;

    fn state(&self) -> Result<Mode> {
        self.client.get_mode(self.pin)
    }
}
