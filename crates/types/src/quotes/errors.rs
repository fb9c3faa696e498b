//! Error types for quote operations

use thiserror::Error;

/// Validation errors for quote data and user input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteValidationError {
	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Unknown quote type: {value}")]
	UnknownQuoteType { value: String },

	#[error("Unknown note tab: {value}")]
	UnknownNoteTab { value: String },

	#[error("Invalid client name: {reason}")]
	InvalidClientName { reason: String },

	#[error("No products given for removal")]
	EmptyProductList,
}

/// General quote-related errors
#[derive(Error, Debug)]
pub enum QuoteError {
	#[error("Quote validation failed: {0}")]
	Validation(#[from] QuoteValidationError),

	#[error("Quote not found: {quote_id}")]
	NotFound { quote_id: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
