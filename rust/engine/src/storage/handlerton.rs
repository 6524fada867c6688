use super::Handler;
use crate::table::TableShare;

/// Engine supports `TRUNCATE` by dropping and recreating the table
pub const HTON_CAN_RECREATE: u32 = 1 << 2;

/// A "handlerton" ("handler singleton") is the entrypoint for a storage engine handler.
///
/// This defines registration and creation information, and owns whatever
/// state all handlers of the engine share.
pub trait Handlerton: Send + Sync + Sized {
    type Handler: Handler<Handlerton = Self>;

    const FLAGS: u32 = 0;

    /// Extensions of files created for a single table in the database directory
    /// (`datadir/db_name/`).
    const TABLEFILE_EXTENSIONS: &'static [&'static str] = &[];

    /// Create a handler for one open instance of `table`
    fn create_handler(&self, table: &TableShare) -> Self::Handler {
        Self::Handler::new(self, table)
    }
}
