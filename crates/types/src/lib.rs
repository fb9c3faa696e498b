//! QuoteDesk Types
//!
//! Shared models and traits for the broker quote client. This crate owns the
//! deserialization boundary for backend payloads: everything downstream works
//! on fully defaulted, strongly typed snapshots.

pub mod api;
pub mod money;
pub mod preferences;
pub mod quotes;
pub mod secret;
pub mod storage;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use api::{
	ApiError, ApiResult, DuplicateQuoteResponse, GeneratePdfRequest, PdfDocument, PdfOptions,
	QuoteApi, QuoteListItem, RemoveProductsRequest, RenameClientRequest,
};
pub use money::Money;
pub use preferences::{ThemeMode, UserPreferences};
pub use quotes::{
	AgeBracket, BracketCounts, BracketPrices, City, EntityId, Expertise, NoteTab, Plan, Product,
	Quote, QuoteError, QuoteResult, QuoteType, QuoteValidationError, QuoteValidationResult,
	Refnet, Table,
};
pub use secret::SecretString;
pub use storage::{PreferencesStorage, StorageError, StorageResult};

#[cfg(any(test, feature = "test-utils"))]
pub use api::MockQuoteApi;
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockPreferencesStorage;
