//! QuoteDesk Storage
//!
//! Device-local persistence for user preferences. The full quote graph is
//! never stored; only the scalar preferences survive restarts.

pub mod file_store;
pub mod memory_store;
pub mod traits;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::{PreferencesStorage, StorageError, StorageResult};
