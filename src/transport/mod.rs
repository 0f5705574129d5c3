//! Transport Module
//!
//! Moves packets between the client and the daemon.
//!
//! ## Architecture
//! - [`Transport`]: one request in, one response out
//! - [`Session`]: the socket implementation, one connection per session
//! - [`Channel`]: the byte stream under a session (TCP or anything else)
//! - [`Clock`]: time source for the bounded response poll

mod channel;
mod clock;
mod session;

use std::sync::Arc;

pub use channel::Channel;
pub use clock::{Clock, ManualClock, SystemClock};
pub use session::{Session, SessionOptions};

use crate::error::Result;
use crate::protocol::Packet;

/// Synchronous request/response exchange with the daemon
pub trait Transport: Send + Sync {
    /// Send `request` and return the matching response without
    /// interpreting its result
    fn exchange(&self, request: &Packet) -> Result<Packet>;

    /// Release the underlying connection
    fn close(&self) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn exchange(&self, request: &Packet) -> Result<Packet> {
        (**self).exchange(request)
    }

    fn close(&self) -> Result<()> {
        (**self).close()
    }
}
