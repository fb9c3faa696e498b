//! Storage traits for pluggable preference stores

// Re-export the storage traits from types crate
pub use quotedesk_types::storage::{PreferencesStorage, StorageError, StorageResult};
