//! Fixed length row buffers
//!
//! The host hands us rows as raw record images of `record_length` bytes and
//! the wire carries exactly the same bytes, so encoding is a sized copy.
//! Callers check sizes up front with [`RowCodec::check_len`]; past that the
//! codec never fails, and a row of the wrong size is zero extended or
//! truncated (and logged) so that nothing but `record_length` bytes ever
//! reaches the socket.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{KetiError, Result};

/// One row in wire form. Always exactly `record_length` bytes for its table.
#[derive(Clone, PartialEq, Eq)]
pub struct RowBuffer(Box<[u8]>);

impl RowBuffer {
    /// A buffer of `len` zero bytes, used as a receive target
    pub fn zeroed(len: usize) -> Self {
        Self(vec![0u8; len].into_boxed_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_vec()
    }

    /// Check whether the buffer carries `token` at its start.
    ///
    /// Only `token.len()` bytes are compared, whatever follows is ignored. If
    /// the buffer is shorter than the token, the token truncated to the buffer
    /// length must match instead.
    pub fn starts_with_token(&self, token: &[u8]) -> bool {
        let n = self.len().min(token.len());
        n > 0 && self.0[..n] == token[..n]
    }
}

impl AsRef<[u8]> for RowBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for RowBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowBuffer({})", hex::encode(&self.0))
    }
}

/// Converts between host record images and [`RowBuffer`]s for one table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowCodec {
    record_length: usize,
}

impl RowCodec {
    pub const fn new(record_length: usize) -> Self {
        Self { record_length }
    }

    pub const fn record_length(&self) -> usize {
        self.record_length
    }

    /// Fail unless `len` is exactly one record
    ///
    /// # Errors
    ///
    /// [`KetiError::RowLength`] on any other length
    pub fn check_len(&self, len: usize) -> Result<()> {
        if len == self.record_length {
            Ok(())
        } else {
            Err(KetiError::RowLength {
                expected: self.record_length,
                actual: len,
            })
        }
    }

    /// Copy a host row into a wire buffer
    pub fn encode(&self, row: &[u8]) -> RowBuffer {
        let mut buf = RowBuffer::zeroed(self.record_length);
        fit_into(row, buf.as_mut_bytes(), "encode");
        buf
    }

    /// Copy a wire buffer out as an owned host row
    pub fn decode(&self, buf: &RowBuffer) -> Vec<u8> {
        let mut row = vec![0u8; self.record_length];
        fit_into(buf.as_bytes(), &mut row, "decode");
        row
    }

    /// Copy a wire buffer into a host-provided record buffer
    pub fn decode_into(&self, buf: &RowBuffer, dst: &mut [u8]) {
        fit_into(buf.as_bytes(), dst, "decode");
    }
}

/// Copy `src` into `dst`, zero extending or truncating on a size mismatch
fn fit_into(src: &[u8], dst: &mut [u8], what: &str) {
    let action = match src.len().cmp(&dst.len()) {
        Ordering::Equal => {
            dst.copy_from_slice(src);
            return;
        }
        Ordering::Less => {
            dst[..src.len()].copy_from_slice(src);
            dst[src.len()..].fill(0);
            "zero extending"
        }
        Ordering::Greater => {
            dst.copy_from_slice(&src[..dst.len()]);
            "truncating"
        }
    };
    log::warn!(
        "{what}: got {} bytes for a {} byte record, {action}",
        src.len(),
        dst.len()
    );
}
