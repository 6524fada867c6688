//! Full table scans against the remote store
//!
//! A scan owns one [`Connection`] for its whole life:
//!
//! ```text
//! Idle --begin--> Active --next (ack or error)--> Ended
//!   \____________________end____________________/
//! ```
//!
//! The peer never streams more than one exchange per scan: each fetch is
//! answered by a `record_length` acknowledgment carrying `"success"`, after
//! which the scan is over. There is no count or length field in the protocol
//! that would let us iterate safely past that.

use std::fmt;

use crate::codec::{RowBuffer, RowCodec};
use crate::config::ClientConfig;
use crate::error::{KetiError, Result};
use crate::transport::{AbortHandle, Connection};
use crate::SUCCESS_TOKEN;

/// Where a [`ScanSession`] is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Not connected yet
    Idle,
    /// Connected and ready to fetch
    Active,
    /// Connection released; terminal
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Ended => "ended",
        };
        f.write_str(s)
    }
}

/// One table scan. Fetches are strictly sequential (`&mut self`).
#[derive(Debug)]
pub struct ScanSession {
    cfg: ClientConfig,
    codec: RowCodec,
    conn: Option<Connection>,
    state: SessionState,
}

impl ScanSession {
    /// Create an idle session; nothing touches the network until [`begin`].
    ///
    /// [`begin`]: Self::begin
    pub fn new(cfg: &ClientConfig, codec: RowCodec) -> Self {
        Self {
            cfg: cfg.clone(),
            codec,
            conn: None,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Connect to the peer. On failure the session stays idle.
    ///
    /// # Errors
    ///
    /// [`KetiError::Connect`] if the peer cannot be reached,
    /// [`KetiError::InvalidState`] if the session is not idle
    pub fn begin(&mut self) -> Result<()> {
        self.expect_state("begin", SessionState::Idle)?;
        let conn = Connection::connect(&self.cfg)?;
        log::debug!("scan started against {}", conn.endpoint());
        self.conn = Some(conn);
        self.state = SessionState::Active;
        Ok(())
    }

    /// Fetch the next row.
    ///
    /// Returns `Ok(None)` at end of scan. With the current peer that is the
    /// outcome of the first acknowledged fetch, and the session is ended right
    /// away. Any failure also ends the session.
    ///
    /// # Errors
    ///
    /// [`KetiError::InvalidState`] without any I/O if the session is not
    /// active, [`KetiError::Io`] on a short read or hangup,
    /// [`KetiError::Protocol`] if the acknowledgment is not `"success"`
    pub fn next(&mut self) -> Result<Option<RowBuffer>> {
        self.expect_state("fetch from", SessionState::Active)?;
        let res = self.fetch();
        // Either the peer signalled the end or the exchange failed; both are terminal
        self.end();
        res.map(|ack| {
            log::debug!("scan finished, peer acknowledged with {ack:?}");
            None
        })
    }

    fn fetch(&mut self) -> Result<RowBuffer> {
        let record_length = self.codec.record_length();
        let state = self.state;
        let conn = self.conn.as_mut().ok_or(KetiError::InvalidState {
            op: "fetch from",
            state,
        })?;

        conn.send_read()?;
        let ack = conn.recv_row(record_length)?;
        if ack.starts_with_token(SUCCESS_TOKEN) {
            Ok(ack)
        } else {
            Err(KetiError::protocol(ack.as_bytes()))
        }
    }

    /// Release the connection, if any. Idempotent.
    pub fn end(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            conn.close();
        }
        if self.state != SessionState::Ended {
            log::trace!("scan session {} -> ended", self.state);
        }
        self.state = SessionState::Ended;
    }

    /// Handle to abort a blocked fetch from another thread
    ///
    /// # Errors
    ///
    /// [`KetiError::InvalidState`] unless the session is active
    pub fn abort_handle(&self) -> Result<AbortHandle> {
        self.expect_state("abort", SessionState::Active)?;
        match &self.conn {
            Some(conn) => conn.abort_handle(),
            None => Err(KetiError::InvalidState {
                op: "abort",
                state: self.state,
            }),
        }
    }

    fn expect_state(&self, op: &'static str, want: SessionState) -> Result<()> {
        if self.state == want {
            Ok(())
        } else {
            Err(KetiError::InvalidState {
                op,
                state: self.state,
            })
        }
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        self.end();
    }
}
