//! Backend actions on quotes
//!
//! Wraps the quote API with input validation and a per-action in-flight
//! guard. Failed calls leave the caller's session untouched; nothing is
//! retried automatically.

use dashmap::DashMap;
use quotedesk_types::{
	ApiError, EntityId, PdfDocument, PdfOptions, Quote, QuoteApi, QuoteListItem,
	QuoteValidationError,
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::session::QuoteSession;

/// User-triggered backend action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteAction {
	List,
	Fetch,
	RemoveProducts,
	RenameClient,
	Duplicate,
	Delete,
	GeneratePdf,
}

impl QuoteAction {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::List => "list",
			Self::Fetch => "fetch",
			Self::RemoveProducts => "remove-products",
			Self::RenameClient => "rename-client",
			Self::Duplicate => "duplicate",
			Self::Delete => "delete",
			Self::GeneratePdf => "generate-pdf",
		}
	}
}

impl fmt::Display for QuoteAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Error)]
pub enum QuoteActionError {
	#[error("backend error: {0}")]
	Api(#[from] ApiError),
	#[error("validation error: {0}")]
	Validation(#[from] QuoteValidationError),
	#[error("{action} already in progress for quote {quote_id}")]
	Busy {
		action: QuoteAction,
		quote_id: EntityId,
	},
}

impl QuoteActionError {
	/// Message suitable for an inline alert
	pub fn user_message(&self) -> String {
		match self {
			Self::Api(e) => e.user_message(),
			Self::Validation(QuoteValidationError::InvalidClientName { reason }) => {
				format!("Nome do cliente inválido: {}", reason)
			},
			Self::Validation(QuoteValidationError::EmptyProductList) => {
				"Selecione ao menos um produto.".to_string()
			},
			Self::Validation(e) => format!("Dados inválidos: {}", e),
			Self::Busy { .. } => "Aguarde a conclusão da operação anterior.".to_string(),
		}
	}
}

pub type QuoteActionResult<T> = Result<T, QuoteActionError>;

type InFlightKey = (QuoteAction, EntityId);

/// Marks an action as running until dropped
#[derive(Debug)]
pub struct InFlightGuard {
	registry: Arc<DashMap<InFlightKey, ()>>,
	key: InFlightKey,
}

impl Drop for InFlightGuard {
	fn drop(&mut self) {
		self.registry.remove(&self.key);
	}
}

#[derive(Debug, Clone)]
pub struct QuoteActionService {
	api: Arc<dyn QuoteApi>,
	in_flight: Arc<DashMap<InFlightKey, ()>>,
}

impl QuoteActionService {
	pub fn new(api: Arc<dyn QuoteApi>) -> Self {
		Self {
			api,
			in_flight: Arc::new(DashMap::new()),
		}
	}

	pub fn is_in_flight(&self, action: QuoteAction, quote_id: &EntityId) -> bool {
		self.in_flight.contains_key(&(action, quote_id.clone()))
	}

	/// Claim the (action, quote) slot, failing when it is already taken
	pub fn begin(&self, action: QuoteAction, quote_id: &EntityId) -> QuoteActionResult<InFlightGuard> {
		use dashmap::mapref::entry::Entry;

		let key = (action, quote_id.clone());
		match self.in_flight.entry(key.clone()) {
			Entry::Occupied(_) => Err(QuoteActionError::Busy {
				action,
				quote_id: quote_id.clone(),
			}),
			Entry::Vacant(slot) => {
				slot.insert(());
				Ok(InFlightGuard {
					registry: Arc::clone(&self.in_flight),
					key,
				})
			},
		}
	}

	pub async fn list_quotes(&self) -> QuoteActionResult<Vec<QuoteListItem>> {
		let _guard = self.begin(QuoteAction::List, &EntityId::default())?;
		let quotes = self
			.api
			.list_quotes()
			.await
			.map_err(|e| api_failure(QuoteAction::List, &EntityId::default(), e))?;
		info!("Listed {} quote(s)", quotes.len());
		Ok(quotes)
	}

	pub async fn fetch_quote(&self, quote_id: &EntityId) -> QuoteActionResult<Quote> {
		require_id(quote_id)?;
		let _guard = self.begin(QuoteAction::Fetch, quote_id)?;
		self.api
			.fetch_quote(quote_id)
			.await
			.map_err(|e| api_failure(QuoteAction::Fetch, quote_id, e))
	}

	/// Fetch a quote and open it on its first track
	pub async fn open_session(&self, quote_id: &EntityId) -> QuoteActionResult<QuoteSession> {
		let quote = self.fetch_quote(quote_id).await?;
		info!(
			"Opened quote {} with {} product(s)",
			quote.id,
			quote.product_count()
		);
		Ok(QuoteSession::new(quote))
	}

	/// Re-fetch the session's quote and swap the snapshot in
	pub async fn refresh(&self, session: &mut QuoteSession) -> QuoteActionResult<()> {
		let quote = self.fetch_quote(session.quote_id()).await?;
		session.replace_snapshot(quote);
		Ok(())
	}

	/// Remove products, applying the backend's snapshot or reconciling locally
	pub async fn remove_products(
		&self,
		session: &mut QuoteSession,
		product_ids: &[EntityId],
	) -> QuoteActionResult<()> {
		let quote_id = session.quote_id().clone();
		require_id(&quote_id)?;
		if product_ids.is_empty() {
			return Err(QuoteValidationError::EmptyProductList.into());
		}
		if product_ids.iter().any(EntityId::is_empty) {
			return Err(missing("product_id"));
		}

		let _guard = self.begin(QuoteAction::RemoveProducts, &quote_id)?;
		let updated = self
			.api
			.remove_products(&quote_id, product_ids)
			.await
			.map_err(|e| api_failure(QuoteAction::RemoveProducts, &quote_id, e))?;

		match updated {
			Some(quote) => session.replace_snapshot(quote),
			None => session.remove_products_locally(product_ids),
		}
		info!(
			"Removed {} product(s) from quote {}",
			product_ids.len(),
			quote_id
		);
		Ok(())
	}

	/// Rename the client; blank input clears the name
	pub async fn rename_client(
		&self,
		session: &mut QuoteSession,
		client_name: Option<&str>,
	) -> QuoteActionResult<()> {
		let quote_id = session.quote_id().clone();
		require_id(&quote_id)?;
		let client_name = Quote::normalize_client_name(client_name)?;

		let _guard = self.begin(QuoteAction::RenameClient, &quote_id)?;
		self.api
			.rename_client(&quote_id, client_name.clone())
			.await
			.map_err(|e| api_failure(QuoteAction::RenameClient, &quote_id, e))?;

		let mut next = session.quote().clone();
		next.client_name = client_name;
		session.replace_snapshot(next);
		info!("Renamed client of quote {}", quote_id);
		Ok(())
	}

	/// Duplicate a quote, returning the id to navigate to
	pub async fn duplicate_quote(&self, quote_id: &EntityId) -> QuoteActionResult<EntityId> {
		require_id(quote_id)?;
		let _guard = self.begin(QuoteAction::Duplicate, quote_id)?;
		self.api
			.duplicate_quote(quote_id)
			.await
			.map_err(|e| api_failure(QuoteAction::Duplicate, quote_id, e))
	}

	pub async fn delete_quote(&self, quote_id: &EntityId) -> QuoteActionResult<()> {
		require_id(quote_id)?;
		let _guard = self.begin(QuoteAction::Delete, quote_id)?;
		self.api
			.delete_quote(quote_id)
			.await
			.map_err(|e| api_failure(QuoteAction::Delete, quote_id, e))
	}

	/// Options are passed through untouched
	pub async fn generate_pdf(
		&self,
		quote_id: &EntityId,
		options: &PdfOptions,
	) -> QuoteActionResult<PdfDocument> {
		require_id(quote_id)?;
		let _guard = self.begin(QuoteAction::GeneratePdf, quote_id)?;
		self.api
			.generate_pdf(quote_id, options)
			.await
			.map_err(|e| api_failure(QuoteAction::GeneratePdf, quote_id, e))
	}
}

fn require_id(quote_id: &EntityId) -> QuoteActionResult<()> {
	if quote_id.is_empty() {
		return Err(missing("quote_id"));
	}
	Ok(())
}

fn missing(field: &str) -> QuoteActionError {
	QuoteValidationError::MissingRequiredField {
		field: field.to_string(),
	}
	.into()
}

fn api_failure(action: QuoteAction, quote_id: &EntityId, error: ApiError) -> QuoteActionError {
	warn!("{} failed for quote {}: {}", action, quote_id, error);
	QuoteActionError::Api(error)
}
