//! Transport Session
//!
//! One connection to the daemon, used strictly request-then-response.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::{Channel, Clock, SystemClock, Transport};
use crate::config::{Config, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RESPONSE_TIMEOUT_MS};
use crate::error::{Error, Result, TransportError};
use crate::protocol::{
    check_outgoing, read_response, write_packet, Command, Packet, ResponseShape, HEADER_SIZE,
};

/// Timing knobs for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Ceiling on the wait for a response header
    pub response_timeout: Duration,

    /// Interval between availability checks
    pub poll_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            response_timeout: Duration::from_millis(DEFAULT_RESPONSE_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl SessionOptions {
    /// Reject timings the poll loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::Config("poll interval must be positive".to_string()));
        }
        if self.response_timeout < self.poll_interval {
            return Err(Error::Config(format!(
                "response timeout {:?} shorter than poll interval {:?}",
                self.response_timeout, self.poll_interval
            )));
        }
        Ok(())
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            response_timeout: config.response_timeout(),
            poll_interval: config.poll_interval(),
        }
    }
}

enum State {
    Open(Box<dyn Channel>),
    /// An exchange failed midway; bytes may still be in flight
    Broken(Box<dyn Channel>),
    Closed,
}

/// A single synchronous connection to the daemon
///
/// ## Concurrency
/// - `exchange` holds the state lock across write and read, so concurrent
///   callers are queued and their bytes never interleave
/// - `close` raises a flag first, so a caller stuck polling gives up at its
///   next check instead of waiting out the timeout
pub struct Session {
    state: Mutex<State>,
    closing: AtomicBool,
    options: SessionOptions,
    clock: Arc<dyn Clock>,
    peer: String,
}

impl Session {
    /// Connect to the daemon described by `config`
    ///
    /// Fails immediately if the daemon cannot be reached; there is no retry.
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let addr = config.addr();
        let stream = open_stream(config).map_err(|source| TransportError::Connect {
            addr: addr.clone(),
            source,
        })?;

        tracing::debug!("Connected to daemon at {}", addr);

        Ok(Self::build(
            Box::new(stream),
            SessionOptions::from(config),
            Arc::new(SystemClock),
            addr,
        ))
    }

    /// Run a session over an already-open channel
    pub fn from_channel(channel: impl Channel + 'static, options: SessionOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(
            Box::new(channel),
            options,
            Arc::new(SystemClock),
            "channel".to_string(),
        ))
    }

    /// Replace the time source used by the poll loop
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn build(
        channel: Box<dyn Channel>,
        options: SessionOptions,
        clock: Arc<dyn Clock>,
        peer: String,
    ) -> Self {
        Self {
            state: Mutex::new(State::Open(channel)),
            closing: AtomicBool::new(false),
            options,
            clock,
            peer,
        }
    }

    /// Send one request and return the daemon's response, uninterpreted
    ///
    /// 1. Encode, write and flush the request
    /// 2. Poll until a full header is readable or the timeout passes
    /// 3. Decode the response using the command's response shape
    /// 4. Check the response echoes the request's opcode
    ///
    /// Any failure after the first byte is written leaves the session broken.
    pub fn exchange(&self, request: &Packet) -> Result<Packet> {
        let mut state = self.state.lock();

        let channel = match &mut *state {
            State::Open(channel) => channel,
            State::Broken(_) => return Err(TransportError::Broken.into()),
            State::Closed => return Err(TransportError::Closed.into()),
        };

        if self.closing.load(Ordering::Acquire) {
            return Err(TransportError::Closed.into());
        }

        // Nothing written yet, so the session stays usable
        check_outgoing(request)?;

        let shape = request
            .command()
            .map(Command::response_shape)
            .unwrap_or(ResponseShape::Plain);

        let outcome = self.round_trip(channel.as_mut(), request, shape);

        if let Err(ref e) = outcome {
            tracing::warn!("Exchange with {} failed: {}", self.peer, e);
            let previous = std::mem::replace(&mut *state, State::Closed);
            *state = match previous {
                State::Open(channel) => State::Broken(channel),
                other => other,
            };
        }

        outcome
    }

    fn round_trip(
        &self,
        channel: &mut dyn Channel,
        request: &Packet,
        shape: ResponseShape,
    ) -> Result<Packet> {
        write_packet(channel, request)?;
        self.wait_for_header(channel)?;

        let response = read_response(channel, shape)?;
        if response.command != request.command {
            return Err(TransportError::Desynchronized {
                expected: request.command,
                received: response.command,
            }
            .into());
        }

        tracing::trace!(
            "{} p1={} p2={} -> result={} ext={}",
            request
                .command()
                .map(|c| c.mnemonic())
                .unwrap_or("?"),
            request.p1,
            request.p2,
            response.result(),
            response.extension.len()
        );

        Ok(response)
    }

    /// Bounded poll for a full response header
    fn wait_for_header(&self, channel: &mut dyn Channel) -> Result<()> {
        let started = self.clock.now();
        let timeout = self.options.response_timeout;

        loop {
            if self.closing.load(Ordering::Acquire) {
                return Err(TransportError::Closed.into());
            }

            if channel.available()? >= HEADER_SIZE {
                return Ok(());
            }

            let waited = self.clock.now().saturating_duration_since(started);
            if waited >= timeout {
                return Err(TransportError::Timeout { waited }.into());
            }

            self.clock
                .sleep(self.options.poll_interval.min(timeout - waited));
        }
    }

    /// Release the connection; later exchanges fail with `Closed`
    pub fn close(&self) -> Result<()> {
        self.closing.store(true, Ordering::Release);

        let mut state = self.state.lock();
        match std::mem::replace(&mut *state, State::Closed) {
            State::Open(mut channel) | State::Broken(mut channel) => {
                tracing::debug!("Closing session to {}", self.peer);
                channel.disconnect()?;
            }
            State::Closed => {}
        }
        Ok(())
    }

    /// True until the session is closed or broken
    pub fn is_open(&self) -> bool {
        matches!(*self.state.lock(), State::Open(_))
    }

    /// True after a failed exchange, until closed
    pub fn is_broken(&self) -> bool {
        matches!(*self.state.lock(), State::Broken(_))
    }

    /// Peer description for logging
    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }
}

impl Transport for Session {
    fn exchange(&self, request: &Packet) -> Result<Packet> {
        Session::exchange(self, request)
    }

    fn close(&self) -> Result<()> {
        Session::close(self)
    }
}

fn open_stream(config: &Config) -> io::Result<TcpStream> {
    let mut last_err = None;

    for addr in config.addr().to_socket_addrs()? {
        let connected = if config.connect_timeout_ms > 0 {
            TcpStream::connect_timeout(&addr, config.connect_timeout())
        } else {
            TcpStream::connect(addr)
        };

        match connected {
            Ok(stream) => {
                stream.set_nodelay(config.nodelay)?;
                // Bounds the extension read once a header has arrived
                stream.set_read_timeout(Some(config.response_timeout()))?;
                stream.set_write_timeout(Some(config.response_timeout()))?;
                return Ok(stream);
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "address resolved to nothing")
    }))
}
