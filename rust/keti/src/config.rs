//! Where the remote store lives and how long we are willing to wait for it

use std::env;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{KetiError, Result};

/// Environment variable holding the peer address, `a.b.c.d:port`
pub const ENV_ENDPOINT: &str = "KETI_ENDPOINT";
/// Environment variable holding the connect timeout in milliseconds
pub const ENV_CONNECT_TIMEOUT_MS: &str = "KETI_CONNECT_TIMEOUT_MS";
/// Environment variable holding the send/receive timeout in milliseconds
pub const ENV_IO_TIMEOUT_MS: &str = "KETI_IO_TIMEOUT_MS";

const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::new(10, 0, 5, 101);
const DEFAULT_PORT: u16 = 8188;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(30);

/// Network address of the remote row store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Endpoint {
    pub const fn new(host: Ipv4Addr, port: u16) -> Self {
        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.host, self.port))
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = KetiError;

    fn from_str(s: &str) -> Result<Self> {
        let (host, port) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| KetiError::Config(format!("endpoint {s:?} is not host:port")))?;
        let host = host
            .parse()
            .map_err(|e| KetiError::Config(format!("endpoint host {host:?}: {e}")))?;
        let port = port
            .parse()
            .map_err(|e| KetiError::Config(format!("endpoint port {port:?}: {e}")))?;
        Ok(Self { host, port })
    }
}

impl From<SocketAddrV4> for Endpoint {
    fn from(addr: SocketAddrV4) -> Self {
        Self::new(*addr.ip(), addr.port())
    }
}

/// Settings shared by every connection a handler opens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    /// Bound on the TCP handshake. `None` waits for the OS default.
    pub connect_timeout: Option<Duration>,
    /// Bound on every single send and receive. `None` blocks indefinitely.
    pub io_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            io_timeout: Some(DEFAULT_IO_TIMEOUT),
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout.filter(|d| !d.is_zero());
        self
    }

    #[must_use]
    pub fn with_io_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.io_timeout = timeout.filter(|d| !d.is_zero());
        self
    }

    /// Build a config from the `KETI_*` environment variables. Unset variables
    /// keep their defaults, a timeout of `0` disables that timeout.
    ///
    /// # Errors
    ///
    /// Error if a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(ep) = lookup(ENV_ENDPOINT) {
            cfg.endpoint = ep.parse()?;
        }
        if let Some(ms) = lookup(ENV_CONNECT_TIMEOUT_MS) {
            cfg = cfg.with_connect_timeout(Some(parse_millis(ENV_CONNECT_TIMEOUT_MS, &ms)?));
        }
        if let Some(ms) = lookup(ENV_IO_TIMEOUT_MS) {
            cfg = cfg.with_io_timeout(Some(parse_millis(ENV_IO_TIMEOUT_MS, &ms)?));
        }

        log::debug!("client config: {cfg:?}");
        Ok(cfg)
    }
}

fn parse_millis(key: &str, val: &str) -> Result<Duration> {
    val.trim()
        .parse()
        .map(Duration::from_millis)
        .map_err(|e| KetiError::Config(format!("{key}={val:?}: {e}")))
}
