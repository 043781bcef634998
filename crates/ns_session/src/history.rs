use async_trait::async_trait;
use ns_core::Result;

/// How many recent queries are surfaced to other components.
pub const HISTORY_WINDOW: usize = 5;

/// Cap on the persisted history, applied at write time so the backing file
/// cannot grow without bound across a long session.
pub const MAX_PERSISTED_ENTRIES: usize = 100;

/// Durable storage for the search history.
///
/// The persisted form is newline-delimited UTF-8 text, one query per line,
/// rewritten wholesale on every persist. Queries containing a newline split
/// into separate entries on reload; neighboring entries are unaffected.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load all persisted entries in chronological order. Missing storage
    /// loads as empty, not as an error.
    async fn load(&self) -> Result<Vec<String>>;

    /// Overwrite storage with the given entries.
    async fn persist(&self, entries: &[String]) -> Result<()>;

    /// Truncate storage to empty.
    async fn clear(&self) -> Result<()>;
}
