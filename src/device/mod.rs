//! Device Module
//!
//! Small stateful wrappers over the command facade. Each device is built
//! from a few capability traits instead of a class hierarchy:
//!
//! - [`Readable`]: produces a value
//! - [`Writable`]: accepts a value
//! - [`StateHolder`]: reports its current state
//!
//! Devices that own a daemon handle close it when dropped.

mod pin;
mod i2c;
mod spi;
mod serial;

pub use pin::{DigitalInput, DigitalOutput};
pub use i2c::I2cDevice;
pub use spi::SpiDevice;
pub use serial::SerialPort;

use crate::error::Result;

/// Something a value can be read from
pub trait Readable {
    type Value;

    fn read(&self) -> Result<Self::Value>;
}

/// Something a value can be written to
pub trait Writable {
    type Value;

    fn write(&self, value: Self::Value) -> Result<()>;
}

/// Something that can report its current state
pub trait StateHolder {
    type State;

    fn state(&self) -> Result<Self::State>;
}
