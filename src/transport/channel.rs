//! Byte channels a session can run over

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

use crate::protocol::HEADER_SIZE;

/// A bidirectional byte stream that can report pending input
pub trait Channel: Read + Write + Send {
    /// Bytes readable right now without blocking.
    ///
    /// Implementations may cap the answer at [`HEADER_SIZE`]; the session
    /// only needs to know whether a full header has arrived. A peer that
    /// closed its side reports `UnexpectedEof`.
    fn available(&mut self) -> io::Result<usize>;

    /// Tear down both directions
    fn disconnect(&mut self) -> io::Result<()>;
}

impl Channel for TcpStream {
    fn available(&mut self) -> io::Result<usize> {
        let mut buf = [0u8; HEADER_SIZE];
        self.set_nonblocking(true)?;
        let peeked = self.peek(&mut buf);
        self.set_nonblocking(false)?;

        match peeked {
            Ok(0) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "daemon closed the connection",
            )),
            Ok(n) => Ok(n),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn disconnect(&mut self) -> io::Result<()> {
        match TcpStream::shutdown(self, Shutdown::Both) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}
