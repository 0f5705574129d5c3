//! Packet definitions
//!
//! A packet is one protocol message, request or response: a fixed 16-byte
//! header of four u32 slots plus an optional extension.

use bytes::Bytes;

use super::{Command, HeaderField};

/// Header size: four little-endian u32 fields
pub const HEADER_SIZE: usize = 16;

/// One protocol message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Command opcode (echoed back by the daemon)
    pub command: u32,

    /// First parameter
    pub p1: u32,

    /// Second parameter
    pub p2: u32,

    /// Requests: extension length. Responses: signed result.
    pub p3: u32,

    /// Bytes following the header
    pub extension: Bytes,
}

impl Packet {
    /// Build a request with no extension
    pub fn request(command: Command, p1: u32, p2: u32) -> Self {
        Self {
            command: command.opcode(),
            p1,
            p2,
            p3: 0,
            extension: Bytes::new(),
        }
    }

    /// Build a request whose extension length travels in `p3`
    pub fn request_with_extension(
        command: Command,
        p1: u32,
        p2: u32,
        extension: impl Into<Bytes>,
    ) -> Self {
        let extension = extension.into();
        Self {
            command: command.opcode(),
            p1,
            p2,
            p3: length_field(extension.len()),
            extension,
        }
    }

    /// Build a response carrying a plain result
    pub fn response(command: u32, p1: u32, p2: u32, result: i32) -> Self {
        Self {
            command,
            p1,
            p2,
            p3: result as u32,
            extension: Bytes::new(),
        }
    }

    /// Build a response whose result is the length of `data`
    pub fn response_with_data(command: u32, p1: u32, p2: u32, data: impl Into<Bytes>) -> Self {
        let extension = data.into();
        Self {
            command,
            p1,
            p2,
            p3: length_field(extension.len()),
            extension,
        }
    }

    /// The fourth header field read as the daemon's signed result
    pub fn result(&self) -> i32 {
        self.p3 as i32
    }

    /// Read a header slot by name
    pub fn field(&self, field: HeaderField) -> u32 {
        match field {
            HeaderField::Command => self.command,
            HeaderField::Param1 => self.p1,
            HeaderField::Param2 => self.p2,
            HeaderField::Result => self.p3,
        }
    }

    /// The typed command, if the opcode is one this crate knows
    pub fn command(&self) -> Option<Command> {
        Command::from_opcode(self.command)
    }

    /// Total encoded size
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.extension.len()
    }
}

/// Extension length as a header slot; oversized payloads saturate and are
/// rejected by [`write_packet`](super::write_packet) before reaching the wire
fn length_field(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
