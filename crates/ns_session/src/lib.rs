pub mod backends;
pub mod history;
pub mod session;

pub use backends::{FileHistoryStore, MemoryHistoryStore};
pub use history::{HistoryStore, HISTORY_WINDOW, MAX_PERSISTED_ENTRIES};
pub use session::SearchSessionStore;

pub mod prelude {
    pub use crate::backends::{FileHistoryStore, MemoryHistoryStore};
    pub use crate::history::HistoryStore;
    pub use crate::session::SearchSessionStore;
    pub use ns_core::{Error, Result};
}
