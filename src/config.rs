//! Configuration for pigwire
//!
//! Centralized session configuration with the daemon's defaults.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Daemon's default host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Daemon's default listening port
pub const DEFAULT_PORT: u16 = 8888;

/// Ceiling on the wait for a response header (milliseconds)
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 500;

/// Interval between response availability checks (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5;

/// TCP connect timeout (milliseconds)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 3000;

/// Environment variable overriding the daemon host
pub const ENV_HOST: &str = "PIGPIO_ADDR";

/// Environment variable overriding the daemon port
pub const ENV_PORT: &str = "PIGPIO_PORT";

/// Connection configuration for a daemon session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Target
    // -------------------------------------------------------------------------
    /// Daemon host name or address
    pub host: String,

    /// Daemon TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Timing
    // -------------------------------------------------------------------------
    /// Connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Response-wait ceiling per exchange (milliseconds)
    pub response_timeout_ms: u64,

    /// Poll interval while waiting for a response (milliseconds)
    pub poll_interval_ms: u64,

    // -------------------------------------------------------------------------
    // Socket
    // -------------------------------------------------------------------------
    /// Disable Nagle's algorithm
    pub nodelay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            response_timeout_ms: DEFAULT_RESPONSE_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            nodelay: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Defaults overlaid with `PIGPIO_ADDR` / `PIGPIO_PORT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup(ENV_HOST).filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup(ENV_PORT) {
            config.port = port.trim().parse().map_err(|_| {
                Error::Config(format!("{} is not a valid port: {:?}", ENV_PORT, port))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// `host:port` string used to connect
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject settings a session cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll interval must be positive".to_string()));
        }
        if self.response_timeout_ms < self.poll_interval_ms {
            return Err(Error::Config(format!(
                "response timeout {}ms shorter than poll interval {}ms",
                self.response_timeout_ms, self.poll_interval_ms
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the daemon host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the daemon port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the response timeout (in milliseconds)
    pub fn response_timeout_ms(mut self, ms: u64) -> Self {
        self.config.response_timeout_ms = ms;
        self
    }

    /// Set the poll interval (in milliseconds)
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
