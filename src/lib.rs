//! QuoteDesk
//!
//! Client-side core of the broker quote app: quote snapshots and everything
//! the quote screens derive from them, the backend API client, device-local
//! preferences and the application context tying them together.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

// Core domain types
pub use quotedesk_types::{
	chrono,
	serde_json,
	AgeBracket,
	ApiError,
	BracketCounts,
	BracketPrices,
	City,
	EntityId,
	Money,
	NoteTab,
	PdfDocument,
	PdfOptions,
	Plan,
	Product,
	Quote,
	QuoteApi,
	QuoteError,
	QuoteListItem,
	QuoteType,
	QuoteValidationError,
	Refnet,
	Table,
	ThemeMode,
	UserPreferences,
};

// Service layer
pub use quotedesk_service::{
	build_share_message, price_breakdown, PriceBreakdown, QuoteActionError, QuoteActionService,
	QuoteSession, RichText, SalesAreaMatrix, SelectionSet,
};

// Storage layer
pub use quotedesk_storage::{
	FileStore, MemoryStore, PreferencesStorage, StorageError, StorageResult,
};

// Client
pub use quotedesk_client::HttpQuoteApi;

// Config
pub use quotedesk_config::{
	load_config, log_service_info, log_service_shutdown, ConfigLoadError, Settings,
};

pub mod models {
	pub use quotedesk_types::*;
}

pub mod config {
	pub use quotedesk_config::*;
}

pub mod storage {
	pub use quotedesk_storage::*;
}

pub mod client {
	pub use quotedesk_client::*;
}

pub mod service {
	pub use quotedesk_service::*;
}

pub mod mocks;

pub use async_trait;

#[derive(Debug, Error)]
pub enum QuoteDeskError {
	#[error("configuration error: {0}")]
	Config(#[from] ConfigLoadError),
	#[error("api client error: {0}")]
	Api(#[from] ApiError),
	#[error("storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Process-wide state shared by every screen and command
///
/// Built once at startup and passed by reference; there is no teardown.
pub struct AppContext {
	settings: Settings,
	api: Arc<dyn QuoteApi>,
	actions: QuoteActionService,
	preferences_storage: Arc<dyn PreferencesStorage>,
	preferences: RwLock<UserPreferences>,
}

impl AppContext {
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn api(&self) -> Arc<dyn QuoteApi> {
		Arc::clone(&self.api)
	}

	/// Validated backend actions; clones share one in-flight registry
	pub fn actions(&self) -> &QuoteActionService {
		&self.actions
	}

	pub fn share_base_url(&self) -> &str {
		&self.settings.share.base_url
	}

	/// Snapshot of the current preferences
	pub async fn preferences(&self) -> UserPreferences {
		self.preferences.read().await.clone()
	}

	/// Apply a change and persist it
	///
	/// The in-memory copy is only replaced once the store accepted the new
	/// value, so a failed save leaves both untouched.
	pub async fn update_preferences<F>(&self, change: F) -> StorageResult<UserPreferences>
	where
		F: FnOnce(&mut UserPreferences),
	{
		let mut current = self.preferences.write().await;
		let mut next = current.clone();
		change(&mut next);

		self.preferences_storage.save(&next).await?;
		*current = next.clone();
		info!("Preferences updated");
		Ok(next)
	}

	/// Forget stored preferences and fall back to defaults
	pub async fn reset_preferences(&self) -> StorageResult<()> {
		let mut current = self.preferences.write().await;
		self.preferences_storage.clear().await?;
		*current = UserPreferences::default();
		Ok(())
	}

	/// Fetch a quote and open it
	pub async fn open_quote(&self, quote_id: &EntityId) -> Result<QuoteSession, QuoteActionError> {
		self.actions.open_session(quote_id).await
	}

	/// Share text for the session, signed with the user's display name when set
	pub async fn share_message(&self, session: &QuoteSession) -> String {
		let mut message = session.summary_text(self.share_base_url());
		if let Some(signature) = self.preferences.read().await.signature() {
			message.push_str(&format!("\n{}", signature));
		}
		message
	}
}

/// Builder for [`AppContext`]
///
/// Anything not provided is derived from the settings: an HTTP API client and
/// a file or in-memory preferences store.
#[derive(Default)]
pub struct QuoteDeskBuilder {
	settings: Option<Settings>,
	api: Option<Arc<dyn QuoteApi>>,
	preferences_storage: Option<Arc<dyn PreferencesStorage>>,
}

impl QuoteDeskBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build from the configuration file and environment
	pub fn from_config() -> Result<Self, QuoteDeskError> {
		Ok(Self::new().with_settings(load_config()?))
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	pub fn with_api(mut self, api: Arc<dyn QuoteApi>) -> Self {
		self.api = Some(api);
		self
	}

	pub fn with_preferences_storage(mut self, storage: Arc<dyn PreferencesStorage>) -> Self {
		self.preferences_storage = Some(storage);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Assemble the context and hydrate preferences from storage
	///
	/// Unreadable preferences are logged and replaced by defaults.
	pub async fn build(self) -> Result<AppContext, QuoteDeskError> {
		let settings = self.settings.unwrap_or_default();

		let api = match self.api {
			Some(api) => api,
			None => Arc::new(HttpQuoteApi::from_settings(&settings)?) as Arc<dyn QuoteApi>,
		};

		let preferences_storage = match self.preferences_storage {
			Some(storage) => storage,
			None => match &settings.storage.preferences_path {
				Some(path) => Arc::new(FileStore::new(path)) as Arc<dyn PreferencesStorage>,
				None => Arc::new(MemoryStore::new()) as Arc<dyn PreferencesStorage>,
			},
		};

		let preferences = match preferences_storage.load().await {
			Ok(Some(preferences)) => preferences,
			Ok(None) => UserPreferences::default(),
			Err(e) => {
				warn!("Ignoring unreadable preferences: {}", e);
				UserPreferences::default()
			},
		};
		info!(
			"Application context ready (theme {:?}, signed as {})",
			preferences.theme,
			preferences.signature().unwrap_or("-")
		);

		Ok(AppContext {
			actions: QuoteActionService::new(Arc::clone(&api)),
			api,
			settings,
			preferences_storage,
			preferences: RwLock::new(preferences),
		})
	}
}

/// Initialize tracing with configuration-based settings
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing_from_settings(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
	use quotedesk_config::LogFormat;

	let log_level = &settings.logging.level;
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	match settings.logging.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt()
				.with_writer(std::io::stderr)
				.json()
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber
					.with_target(true)
					.with_thread_ids(true)
					.try_init()
					.map_err(|e| e.to_string())?;
			} else {
				subscriber.try_init().map_err(|e| e.to_string())?;
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.with_writer(std::io::stderr)
				.pretty()
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber
					.with_target(true)
					.with_thread_ids(true)
					.try_init()
					.map_err(|e| e.to_string())?;
			} else {
				subscriber.try_init().map_err(|e| e.to_string())?;
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.with_writer(std::io::stderr)
				.compact()
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber
					.with_target(true)
					.with_thread_ids(true)
					.try_init()
					.map_err(|e| e.to_string())?;
			} else {
				subscriber.try_init().map_err(|e| e.to_string())?;
			}
		},
	}

	info!(
		"Logging configuration applied: level={}, format={:?}, structured={}",
		settings.logging.level, settings.logging.format, settings.logging.structured
	);

	Ok(())
}
