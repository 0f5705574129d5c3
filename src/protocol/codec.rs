//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬─────────────────────┐
//! │  Cmd (4) │  P1 (4)  │  P2 (4)  │  P3 (4)  │  Extension (P3/res) │
//! └──────────┴──────────┴──────────┴──────────┴─────────────────────┘
//! ```
//!
//! All header fields are little-endian u32. On requests P3 is the extension
//! length. On responses P3 is the signed result; for extended commands a
//! positive result is also the number of bytes that follow.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Packet, ResponseShape, HEADER_SIZE};
use crate::error::{Result, TransportError};

/// Maximum extension size (16 MB)
pub const MAX_EXTENSION_SIZE: u32 = 16 * 1024 * 1024;

/// Parsed header: (command, p1, p2, p3)
type Header = (u32, u32, u32, u32);

// =============================================================================
// Encoding
// =============================================================================

/// Encode a packet to bytes
///
/// Format: command (4) + p1 (4) + p2 (4) + p3 (4) + extension
pub fn encode(packet: &Packet) -> Bytes {
    let mut buf = BytesMut::with_capacity(packet.encoded_len());
    buf.put_u32_le(packet.command);
    buf.put_u32_le(packet.p1);
    buf.put_u32_le(packet.p2);
    buf.put_u32_le(packet.p3);
    buf.put_slice(&packet.extension);
    buf.freeze()
}

// =============================================================================
// Decoding
// =============================================================================

fn parse_header(mut bytes: &[u8]) -> Result<Header> {
    if bytes.len() < HEADER_SIZE {
        return Err(TransportError::Frame(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        ))
        .into());
    }

    Ok((
        bytes.get_u32_le(),
        bytes.get_u32_le(),
        bytes.get_u32_le(),
        bytes.get_u32_le(),
    ))
}

fn check_extension_len(len: u32) -> Result<usize> {
    if len > MAX_EXTENSION_SIZE {
        return Err(TransportError::Frame(format!(
            "Extension too large: {} bytes (max {})",
            len, MAX_EXTENSION_SIZE
        ))
        .into());
    }
    Ok(len as usize)
}

/// Number of extension bytes a response header announces
fn response_extension_len(shape: ResponseShape, p3: u32) -> Result<usize> {
    let result = p3 as i32;
    match shape {
        ResponseShape::Extended if result > 0 => check_extension_len(p3),
        _ => Ok(0),
    }
}

fn assemble(header: Header, extension: &[u8]) -> Packet {
    let (command, p1, p2, p3) = header;
    Packet {
        command,
        p1,
        p2,
        p3,
        extension: Bytes::copy_from_slice(extension),
    }
}

fn take_extension(bytes: &[u8], len: usize) -> Result<&[u8]> {
    let total_len = HEADER_SIZE + len;
    if bytes.len() < total_len {
        return Err(TransportError::Frame(format!(
            "Incomplete extension: expected {} bytes, got {}",
            total_len,
            bytes.len()
        ))
        .into());
    }
    Ok(&bytes[HEADER_SIZE..total_len])
}

/// Decode a request from bytes
///
/// The extension length is taken from the fourth header field.
pub fn decode_request(bytes: &[u8]) -> Result<Packet> {
    let header = parse_header(bytes)?;
    let len = check_extension_len(header.3)?;
    let extension = take_extension(bytes, len)?;
    Ok(assemble(header, extension))
}

/// Decode a response from bytes
///
/// An extension is only read for `Extended` commands with a positive
/// result. A negative result never carries data.
pub fn decode_response(bytes: &[u8], shape: ResponseShape) -> Result<Packet> {
    let header = parse_header(bytes)?;
    let len = response_extension_len(shape, header.3)?;
    let extension = take_extension(bytes, len)?;
    Ok(assemble(header, extension))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

fn read_header<R: Read + ?Sized>(reader: &mut R) -> Result<Header> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;
    parse_header(&header)
}

fn read_extension<R: Read + ?Sized>(reader: &mut R, len: usize) -> Result<Bytes> {
    if len == 0 {
        return Ok(Bytes::new());
    }
    let mut extension = vec![0u8; len];
    reader.read_exact(&mut extension)?;
    Ok(Bytes::from(extension))
}

/// Read a complete request from a stream
///
/// Blocks until the header and the declared extension are received
pub fn read_request<R: Read + ?Sized>(reader: &mut R) -> Result<Packet> {
    let (command, p1, p2, p3) = read_header(reader)?;
    let len = check_extension_len(p3)?;
    let extension = read_extension(reader, len)?;
    Ok(Packet {
        command,
        p1,
        p2,
        p3,
        extension,
    })
}

/// Read a complete response from a stream
pub fn read_response<R: Read + ?Sized>(reader: &mut R, shape: ResponseShape) -> Result<Packet> {
    let (command, p1, p2, p3) = read_header(reader)?;
    let len = response_extension_len(shape, p3)?;
    let extension = read_extension(reader, len)?;
    Ok(Packet {
        command,
        p1,
        p2,
        p3,
        extension,
    })
}

/// Reject a packet whose extension cannot be framed
pub(crate) fn check_outgoing(packet: &Packet) -> Result<()> {
    if packet.extension.len() > MAX_EXTENSION_SIZE as usize {
        return Err(TransportError::Frame(format!(
            "Extension too large: {} bytes (max {})",
            packet.extension.len(),
            MAX_EXTENSION_SIZE
        ))
        .into());
    }
    Ok(())
}

/// Write a packet to a stream and flush it
///
/// Fails without writing anything if the extension exceeds
/// [`MAX_EXTENSION_SIZE`].
pub fn write_packet<W: Write + ?Sized>(writer: &mut W, packet: &Packet) -> Result<()> {
    check_outgoing(packet)?;
    let bytes = encode(packet);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
