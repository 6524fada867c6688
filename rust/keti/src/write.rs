//! Single row inserts

use crate::codec::RowBuffer;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::Connection;
use crate::MAX_STATUS_LEN;

/// Ship one row to the remote store and wait for it to be accepted.
///
/// Every call uses its own connection, which is closed before returning
/// whatever the outcome.
///
/// # Errors
///
/// [`KetiError::Connect`] if the peer is unreachable, [`KetiError::Io`] if the
/// exchange breaks off, [`KetiError::Protocol`] if the peer replies with
/// anything but `"success"`.
///
/// [`KetiError::Connect`]: crate::KetiError::Connect
/// [`KetiError::Io`]: crate::KetiError::Io
/// [`KetiError::Protocol`]: crate::KetiError::Protocol
pub fn write_row(cfg: &ClientConfig, row: &RowBuffer) -> Result<()> {
    let mut conn = Connection::connect(cfg)?;
    let res = exchange(&mut conn, row);
    conn.close();

    match &res {
        Ok(()) => log::debug!("peer accepted {} byte row", row.len()),
        Err(e) => log::debug!("write of {} byte row failed: {e}", row.len()),
    }
    res
}

fn exchange(conn: &mut Connection, row: &RowBuffer) -> Result<()> {
    conn.send_write(row)?;
    conn.recv_status(MAX_STATUS_LEN)?.into_result()
}
