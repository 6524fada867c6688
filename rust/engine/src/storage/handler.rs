use super::{Handlerton, StorageError, StorageResult, MAX_RECORD_LENGTH};
use crate::table::TableShare;

/// How the host wants a table opened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    ReadOnly,
    ReadWrite,
}

/// One open table, as seen by the host's per-statement callbacks.
///
/// Everything except construction and the full scan has a default. The
/// defaults for metadata and locking hooks succeed without doing anything;
/// everything that would need indexes, positions, updates or DDL beyond a
/// no-op reports [`StorageError::WrongCommand`].
#[allow(unused_variables)]
pub trait Handler: Sized {
    type Handlerton: Handlerton;

    fn new(hton: &Self::Handlerton, table: &TableShare) -> Self;

    /// Open a table. `name` is the table path without extension.
    fn open(&mut self, name: &str, mode: Mode) -> StorageResult {
        Ok(())
    }

    fn close(&mut self) -> StorageResult {
        Ok(())
    }

    /// Insert one row. `buf` is the host's record image.
    fn write_row(&mut self, buf: &[u8]) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    fn update_row(&mut self, old: &[u8], new: &[u8]) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    fn delete_row(&mut self, buf: &[u8]) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    /// Start a full table scan
    fn rnd_init(&mut self, scan: bool) -> StorageResult;

    /// Fill `buf` with the next row, or return [`StorageError::EndOfFile`]
    fn rnd_next(&mut self, buf: &mut [u8]) -> StorageResult;

    fn rnd_end(&mut self) -> StorageResult {
        Ok(())
    }

    fn rnd_pos(&mut self, buf: &mut [u8], pos: &[u8]) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    /// Remember the position of the last row read
    fn position(&mut self, record: &[u8]) {}

    fn index_read_map(&mut self, buf: &mut [u8], key: &[u8], keypart_map: u64) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    fn index_next(&mut self, buf: &mut [u8]) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    fn index_prev(&mut self, buf: &mut [u8]) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    fn index_first(&mut self, buf: &mut [u8]) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    fn index_last(&mut self, buf: &mut [u8]) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    /// Give the optimizer statistics
    fn info(&mut self, flag: u32) -> StorageResult {
        Ok(())
    }

    /// Hint from the server
    fn extra(&mut self, operation: u32) -> StorageResult {
        Ok(())
    }

    fn external_lock(&mut self, lock_type: i32) -> StorageResult {
        Ok(())
    }

    fn delete_all_rows(&mut self) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    /// Estimate rows between two keys. A low number pushes the optimizer
    /// towards index use.
    fn records_in_range(&mut self, index: u32) -> u64 {
        10
    }

    fn create(&mut self, name: &str, table: &TableShare) -> StorageResult {
        Ok(())
    }

    fn delete_table(&mut self, name: &str) -> StorageResult {
        Ok(())
    }

    fn rename_table(&mut self, from: &str, to: &str) -> StorageResult {
        Err(StorageError::WrongCommand)
    }

    fn max_supported_record_length(&self) -> usize {
        MAX_RECORD_LENGTH
    }
}
