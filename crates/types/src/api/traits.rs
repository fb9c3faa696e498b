//! Quote backend trait
//!
//! Implemented over HTTP by `quotedesk-client`; tests and demos can provide
//! their own implementations.

use async_trait::async_trait;
use std::fmt::Debug;

use super::{ApiResult, PdfDocument, PdfOptions, QuoteListItem};
use crate::quotes::{EntityId, Quote};

/// Operations the client performs against the quote backend
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait QuoteApi: Send + Sync + Debug {
	/// List the broker's quotes
	async fn list_quotes(&self) -> ApiResult<Vec<QuoteListItem>>;

	/// Fetch a full quote snapshot
	async fn fetch_quote(&self, quote_id: &EntityId) -> ApiResult<Quote>;

	/// Remove products from a quote
	///
	/// Returns the updated snapshot when the backend sends one back; `None`
	/// means the caller reconciles locally.
	async fn remove_products(
		&self,
		quote_id: &EntityId,
		product_ids: &[EntityId],
	) -> ApiResult<Option<Quote>>;

	/// Rename the quote's client; `None` clears the name
	async fn rename_client(&self, quote_id: &EntityId, client_name: Option<String>)
		-> ApiResult<()>;

	/// Duplicate a quote, returning the new quote's id
	async fn duplicate_quote(&self, quote_id: &EntityId) -> ApiResult<EntityId>;

	/// Delete a quote server-side
	async fn delete_quote(&self, quote_id: &EntityId) -> ApiResult<()>;

	/// Render the quote as a PDF with the given display options
	async fn generate_pdf(&self, quote_id: &EntityId, options: &PdfOptions)
		-> ApiResult<PdfDocument>;
}
