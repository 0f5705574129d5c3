//! # pigwire
//!
//! A synchronous client for the pigpio daemon's socket protocol:
//! - Bit-exact 16-byte packet codec with extended payloads
//! - One-request-at-a-time sessions with a bounded response poll
//! - Typed, locally validated GPIO / PWM / I2C / SPI / serial operations
//! - Daemon error codes decoded into named faults
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │          Devices (DigitalOutput, I2cDevice, ...)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Command Facade (Pigpio)                      │
//! │        validate → request → exchange → result / fault        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Transport  │          │    Fault    │
//!   │  (Session)  │          │   decoder   │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │  Protocol   │
//!   │   (codec)   │
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use pigwire::{Config, Pigpio};
//! use pigwire::client::{Level, Mode};
//!
//! let pi = Pigpio::connect(&Config::default())?;
//! pi.set_mode(17, Mode::Output)?;
//! pi.write(17, Level::High)?;
//! assert_eq!(pi.read(17)?, Level::High);
//! # Ok::<(), pigwire::Error>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod fault;

pub mod protocol;
pub mod transport;
pub mod client;
pub mod device;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Error, Result};
pub use config::Config;
pub use fault::{ErrorCode, Fault};
pub use client::Pigpio;
pub use transport::{Session, Transport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of pigwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
