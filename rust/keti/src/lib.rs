//! Client side of the KETI remote row protocol
//!
//! The KETI engine keeps no rows locally. Every inserted row is shipped to a
//! remote store over TCP and table scans ask the same peer for data. The
//! exchange is deliberately tiny:
//!
//! - one opcode byte, `w` (write) or `r` (read)
//! - for writes, exactly `record_length` bytes of row payload, answered by a
//!   short text status (`"success"` or anything else)
//! - for reads, the peer answers with exactly `record_length` bytes
//!
//! `record_length` is never sent; both sides agree on it out of band (it is
//! the host table's fixed row size).
//!
//! Everything here is blocking and runs on the caller's thread.

pub mod codec;
pub mod config;
pub mod error;
pub mod scan;
pub mod transport;
pub mod write;

pub use codec::{RowBuffer, RowCodec};
pub use config::{ClientConfig, Endpoint};
pub use error::{KetiError, Result};
pub use scan::{ScanSession, SessionState};
pub use transport::{AbortHandle, Connection, OpCode, StatusReply};
pub use write::write_row;

/// The only reply the peer uses to signal that it accepted a request
pub const SUCCESS_TOKEN: &[u8] = b"success";

/// Largest status reply we read back after a write
pub const MAX_STATUS_LEN: usize = 20;
