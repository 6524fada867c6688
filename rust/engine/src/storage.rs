//! Interfaces for storage engines
//!
//! These mirror the host's handler callbacks closely enough that a thin FFI
//! shim can forward to them.

mod error;
mod handler;
mod handlerton;

pub use error::{StorageError, StorageResult};
pub use handler::{Handler, Mode};
pub use handlerton::{Handlerton, HTON_CAN_RECREATE};

/// Longest record the host will hand to a handler (`HA_MAX_REC_LENGTH`)
pub const MAX_RECORD_LENGTH: usize = 65535;
