//! Error types for the remote row protocol

use std::io;

use thiserror::Error;

use crate::config::Endpoint;
use crate::scan::SessionState;

/// Type wrapper for `Result` with a [`KetiError`] error variant
pub type Result<T, E = KetiError> = std::result::Result<T, E>;

/// Everything that can go wrong while talking to the remote store.
///
/// All of these are local to the one request that produced them; nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum KetiError {
    /// Socket creation or the TCP handshake failed
    #[error("could not connect to {endpoint}: {source}")]
    Connect {
        endpoint: Endpoint,
        #[source]
        source: io::Error,
    },

    /// Short read or write, peer hangup, timeout or an aborted socket
    #[error("{op} failed: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// The peer answered with something other than the success token
    #[error("peer replied {reply:?} instead of \"success\"")]
    Protocol { reply: String },

    /// The operation is not allowed in the session's current state
    #[error("cannot {op} a scan session that is {state}")]
    InvalidState {
        op: &'static str,
        state: SessionState,
    },

    /// A row handed to the codec is not exactly one record long
    #[error("row is {actual} bytes, the table's records are {expected}")]
    RowLength { expected: usize, actual: usize },

    /// A configuration value could not be used
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl KetiError {
    pub(crate) fn io(op: &'static str, source: io::Error) -> Self {
        Self::Io { op, source }
    }

    /// Build a protocol error, rendering the reply lossily for diagnostics
    pub(crate) fn protocol(reply: &[u8]) -> Self {
        let end = reply.iter().position(|&b| b == 0).unwrap_or(reply.len());
        Self::Protocol {
            reply: String::from_utf8_lossy(&reply[..end]).into_owned(),
        }
    }

    /// True if the failure happened before a connection was established
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }

    /// True if the peer hung up, timed out, or the socket failed mid exchange
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// True if the peer answered but rejected the request
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }
}
