//! Error types for pigwire
//!
//! Provides a unified error type for all operations. Every failure falls
//! into one of three classes:
//! - **Argument**: rejected locally before any bytes hit the socket
//! - **Remote**: the daemon answered with a negative result code
//! - **Transport**: the session could not complete the exchange

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::fault::Fault;
use crate::protocol::Command;

/// Result type alias using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for pigwire operations
#[derive(Debug, Error)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Local Validation Errors
    // -------------------------------------------------------------------------
    #[error("invalid argument: {0}")]
    Argument(#[from] ArgumentError),

    // -------------------------------------------------------------------------
    // Daemon Errors
    // -------------------------------------------------------------------------
    #[error(transparent)]
    Remote(#[from] Fault),

    /// A non-negative result the caller cannot make sense of
    #[error("{command} returned unexpected result {result}: {reason}")]
    UnexpectedResult {
        command: Command,
        result: i32,
        reason: &'static str,
    },

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The daemon's numeric result code, if this error carries one
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Remote(fault) => Some(fault.code.code()),
            Error::UnexpectedResult { result, .. } => Some(*result),
            _ => None,
        }
    }

    /// True when the error was raised locally without any I/O
    pub fn is_argument(&self) -> bool {
        matches!(self, Error::Argument(_))
    }

    /// True when the daemon answered with a negative result
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote(_))
    }

    /// True when the session failed; the session should be discarded
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Transport(err.into())
    }
}

/// A value outside its documented inclusive bounds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} {value} outside [{min}, {max}]")]
pub struct ArgumentError {
    pub name: &'static str,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

/// Failures of the socket session itself
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("no response within {waited:?}")]
    Timeout { waited: Duration },

    #[error("session closed")]
    Closed,

    /// A previous exchange failed midway; the stream can no longer be trusted
    #[error("session unusable after a failed exchange")]
    Broken,

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("response to {received} while waiting for {expected}")]
    Desynchronized { expected: u32, received: u32 },

    #[error("malformed frame: {0}")]
    Frame(String),

    #[error("IO error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => TransportError::ConnectionClosed,
            _ => TransportError::Io(err),
        }
    }
}
