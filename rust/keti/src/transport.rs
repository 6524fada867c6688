//! One blocking TCP connection to the remote row store
//!
//! A [`Connection`] is either open or closed; `close` is idempotent and also
//! runs on drop, so every exit path releases the socket exactly once.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

use strum::EnumIter;

use crate::codec::RowBuffer;
use crate::config::{ClientConfig, Endpoint};
use crate::error::{KetiError, Result};
use crate::SUCCESS_TOKEN;

/// Request selector, sent as a single byte ahead of any payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum OpCode {
    /// Store the row that follows
    Write,
    /// Ask the peer for the next row
    Read,
}

impl OpCode {
    pub const fn wire_byte(self) -> u8 {
        match self {
            Self::Write => b'w',
            Self::Read => b'r',
        }
    }

    pub const fn from_wire_byte(b: u8) -> Option<Self> {
        match b {
            b'w' => Some(Self::Write),
            b'r' => Some(Self::Read),
            _ => None,
        }
    }
}

/// Text status the peer returns after a write
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusReply(Vec<u8>);

impl StatusReply {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The reply is accepted if its first bytes are exactly `"success"`.
    /// Anything after the token is ignored since the peer does not terminate it.
    pub fn is_success(&self) -> bool {
        self.0.len() >= SUCCESS_TOKEN.len() && self.0[..SUCCESS_TOKEN.len()] == *SUCCESS_TOKEN
    }

    /// Fail with a protocol error unless this is the success token
    pub fn into_result(self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(KetiError::protocol(&self.0))
        }
    }
}

/// An open connection to the remote store
#[derive(Debug)]
pub struct Connection {
    /// `None` once closed
    stream: Option<TcpStream>,
    endpoint: Endpoint,
}

impl Connection {
    /// Open a TCP stream to the configured endpoint and apply the I/O timeouts.
    ///
    /// # Errors
    ///
    /// [`KetiError::Connect`] if the socket cannot be created or the handshake
    /// fails (refused, unreachable, timed out). Nothing is retried.
    pub fn connect(cfg: &ClientConfig) -> Result<Self> {
        let endpoint = cfg.endpoint;
        let addr = endpoint.socket_addr();
        log::debug!("connecting to {endpoint}");

        let connect_err = |source| KetiError::Connect { endpoint, source };
        let stream = match cfg.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
            None => TcpStream::connect(addr),
        }
        .map_err(connect_err)?;

        stream.set_read_timeout(cfg.io_timeout).map_err(connect_err)?;
        stream.set_write_timeout(cfg.io_timeout).map_err(connect_err)?;
        stream.set_nodelay(true).map_err(connect_err)?;

        Ok(Self {
            stream: Some(stream),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Send a write request: the `'w'` opcode followed by the row
    ///
    /// # Errors
    ///
    /// [`KetiError::Io`] if the transport accepts fewer bytes than requested
    pub fn send_write(&mut self, row: &RowBuffer) -> Result<()> {
        self.send_request(OpCode::Write, row.as_bytes())
    }

    /// Send a read request, which is the `'r'` opcode alone
    ///
    /// # Errors
    ///
    /// [`KetiError::Io`] if the byte cannot be sent
    pub fn send_read(&mut self) -> Result<()> {
        self.send_request(OpCode::Read, &[])
    }

    /// Opcode and payload go out in a single write
    fn send_request(&mut self, op: OpCode, payload: &[u8]) -> Result<()> {
        let stream = self.stream_mut("send_request")?;

        let mut frame = Vec::with_capacity(1 + payload.len());
        frame.push(op.wire_byte());
        frame.extend_from_slice(payload);

        log::trace!("send {:?}: {}", op, hex::encode(&frame));
        stream
            .write_all(&frame)
            .and_then(|()| stream.flush())
            .map_err(|e| KetiError::io("send_request", e))
    }

    /// Read a status reply of at most `max_len` bytes.
    ///
    /// Reading stops once a full success token worth of bytes is in, at
    /// `max_len`, when the peer closes, or as soon as the bytes so far can no
    /// longer be the start of the token. A short rejection such as `"no"`
    /// therefore returns at once even if the peer keeps the socket open.
    ///
    /// # Errors
    ///
    /// [`KetiError::Io`] if the peer closes before sending anything, or on any
    /// socket error
    pub fn recv_status(&mut self, max_len: usize) -> Result<StatusReply> {
        let stream = self.stream_mut("recv_status")?;
        let want = max_len.min(SUCCESS_TOKEN.len());
        let mut buf = vec![0u8; max_len];
        let mut filled = 0;

        while filled < want && SUCCESS_TOKEN.starts_with(&buf[..filled]) {
            match stream.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(KetiError::io("recv_status", e)),
            }
        }

        if filled == 0 {
            let e = io::Error::new(io::ErrorKind::UnexpectedEof, "peer closed without a reply");
            return Err(KetiError::io("recv_status", e));
        }

        buf.truncate(filled);
        log::trace!("recv status: {}", hex::encode(&buf));
        Ok(StatusReply(buf))
    }

    /// Read exactly `record_length` bytes.
    ///
    /// # Errors
    ///
    /// [`KetiError::Io`] on a short read, peer hangup, timeout, or abort
    pub fn recv_row(&mut self, record_length: usize) -> Result<RowBuffer> {
        let stream = self.stream_mut("recv_row")?;
        let mut row = RowBuffer::zeroed(record_length);
        stream
            .read_exact(row.as_mut_bytes())
            .map_err(|e| KetiError::io("recv_row", e))?;
        log::trace!("recv row: {}", hex::encode(row.as_bytes()));
        Ok(row)
    }

    /// A handle that can tear this connection down from another thread
    ///
    /// # Errors
    ///
    /// Error if the connection is closed or the socket cannot be duplicated
    pub fn abort_handle(&self) -> Result<AbortHandle> {
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| KetiError::io("abort_handle", closed_error()))?;
        let stream = stream
            .try_clone()
            .map_err(|e| KetiError::io("abort_handle", e))?;
        Ok(AbortHandle { stream })
    }

    /// Release the socket. Calling this again is a no-op.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            log::debug!("closing connection to {}", self.endpoint);
            // The peer may already be gone, nothing to do about it
            if let Err(e) = stream.shutdown(Shutdown::Both) {
                log::trace!("shutdown: {e}");
            }
        }
    }

    fn stream_mut(&mut self, op: &'static str) -> Result<&mut TcpStream> {
        self.stream
            .as_mut()
            .ok_or_else(|| KetiError::io(op, closed_error()))
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

/// Shuts down a [`Connection`]'s socket from another thread, making any
/// blocked send or receive on it return an error
#[derive(Debug)]
pub struct AbortHandle {
    stream: TcpStream,
}

impl AbortHandle {
    pub fn abort(&self) {
        log::debug!("aborting connection");
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            log::trace!("abort shutdown: {e}");
        }
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "connection is closed")
}
