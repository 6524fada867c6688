//! Proc macros for the KETI storage engine

mod instrument;

/// Log entry to and exit from a function at `trace` level.
///
/// This is the handler equivalent of the server's `DBUG_TRACE`: the exit
/// record is written by a guard, so it fires on every return path including
/// `?` and early `return`. The annotated crate must depend on `log`.
///
/// ```ignore
/// #[keti_macros::instrument]
/// fn rnd_init(&mut self, scan: bool) -> StorageResult {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn instrument(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    instrument::instrument(attr, item)
}
