//! Remote quote API boundary
//!
//! The backend performs pricing, persistence and PDF rendering. This module
//! only describes the calls the client makes and what comes back.

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::ApiError;
pub use models::{
	DuplicateQuoteResponse, GeneratePdfRequest, PdfDocument, PdfOptions, QuoteListItem,
	RemoveProductsRequest, RenameClientRequest,
};
pub use traits::QuoteApi;

#[cfg(any(test, feature = "test-utils"))]
pub use traits::MockQuoteApi;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
