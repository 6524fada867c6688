//! The KETI storage engine
//!
//! KETI stores nothing locally: inserts are forwarded to a remote row store
//! and full table scans are served by the same peer, using the client in the
//! [`keti`] crate. Everything else a storage engine can be asked to do is
//! either a no-op or reported as an unsupported command.

pub mod plugin;
pub mod storage;
pub mod sys;
pub mod table;

mod ha_keti;
mod status;

pub use ha_keti::{KetiHandler, KetiHton};
pub use status::StatusVar;
pub use table::TableShare;

pub use keti::{ClientConfig, Endpoint};
// Re-export so plugins log through the same facade
pub use log;
