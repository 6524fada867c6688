use std::{fmt, io};

use keti::KetiError;
use strum::{EnumIter, IntoEnumIterator};

pub type StorageResult<T = ()> = Result<T, StorageError>;

/// Storage handler error types, numbered as in `my_base.h`.
///
/// Only the codes this engine can produce or needs to recognize are listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum StorageError {
    /// Didn't find key on read or update
    KeyNotFound = 120,
    /// Duplicate key on write
    FoundDuppKey = 121,
    /// Internal error
    InternalError = 122,
    /// Update with is recoverable
    RecordChanged = 123,
    /// Wrong index given to function
    WrongIndex = 124,
    /// Indexfile is crashed
    Crashed = 126,
    /// Record-file is crashed or table is corrupt
    WrongInRecord = 127,
    /// Out of memory
    OutOfMemory = 128,
    /// Initialization failed and should be retried
    RetryInit = 129,
    /// not a MYI file - no signature
    NotATable = 130,
    /// Command not supported
    WrongCommand = 131,
    /// old databasfile
    OldFile = 132,
    /// No record read in update()
    NoActiveRecord = 133,
    /// A record is not there
    RecordDeleted = 134,
    /// No more room in file
    RecordFileFull = 135,
    /// No more room in file
    IndexFileFull = 136,
    /// end in next/prev/first/last
    EndOfFile = 137,
    /// unsupported extension used
    Unsupported = 138,
    /// Too big row
    ToBigRow = 139,
    /// The table does not exist in engine
    NoSuchTable = 155,
    /// The table existed in storage engine
    TableExist = 156,
    /// Could not connect to storage engine
    NoConnection = 157,
    /// Generic error
    Generic = 168,
}

impl StorageError {
    /// The numeric `HA_ERR_*` code handed back to the host
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Look up an error by its host code
    pub fn from_code(code: i32) -> Option<Self> {
        Self::iter().find(|e| e.code() == code)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?} (error {})", self.code())
    }
}

impl std::error::Error for StorageError {}

/// A lot of storage errors are IO related. We provide an automated conversion that works with `?`.
impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        log::trace!("{e}"); // Caller probably logs the error but log it here just in case
        match e.kind() {
            io::ErrorKind::OutOfMemory => Self::OutOfMemory,
            _ => Self::InternalError,
        }
    }
}

/// The remote store only ever says "yes" or "no", so every failure talking to
/// it is reported to the host as an unsupported command. Callers log the
/// detailed cause before converting.
impl From<KetiError> for StorageError {
    fn from(e: KetiError) -> Self {
        log::trace!("{e}");
        Self::WrongCommand
    }
}
