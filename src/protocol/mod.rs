//! Protocol Module
//!
//! Defines the pigpio socket protocol spoken between client and daemon.
//!
//! ## Packet Format
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬─────────────────────┐
//! │  Cmd (4) │  P1 (4)  │  P2 (4)  │  P3 (4)  │  Extension          │
//! └──────────┴──────────┴──────────┴──────────┴─────────────────────┘
//! ```
//!
//! Requests and responses share the layout. The connection carries one
//! request at a time, so responses are matched to requests by order alone.
//!
//! ### Commands (excerpt)
//! - 0x00: MODES - P1: gpio, P2: mode
//! - 0x03: READ  - P1: gpio
//! - 0x04: WRITE - P1: gpio, P2: level
//! - 0x3D: I2CRB - P1: handle, P2: register
//!
//! ### Results
//! - `>= 0`: success value (or extension length for extended commands)
//! - `< 0`:  error code, see [`crate::fault`]

mod command;
mod packet;
mod codec;

pub use command::{Command, HeaderField, ResponseShape};
pub use packet::{Packet, HEADER_SIZE};
pub use codec::{encode, decode_request, decode_response, MAX_EXTENSION_SIZE};
pub use codec::{read_request, read_response, write_packet};
pub(crate) use codec::check_outgoing;
