//! Configuration settings structures

use crate::api_token::{ApiToken, ApiTokenError};
use quotedesk_types::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub api: ApiSettings,
	pub share: ShareSettings,
	pub storage: StorageSettings,
	pub logging: LoggingSettings,
}

/// Quote backend connection
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiSettings {
	/// Base URL every route is joined to, e.g. `https://api.example.com/v1/`
	pub base_url: String,
	/// Per-request timeout in milliseconds
	pub timeout_ms: u64,
	/// Bearer token, usually `{"type": "env", "value": "QUOTEDESK_TOKEN"}`
	pub token: Option<ApiToken>,
	pub user_agent: String,
}

/// Shareable summary settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShareSettings {
	/// Public page the quote slug is appended to when the backend sends no share URL
	pub base_url: String,
}

/// Local persistence
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageSettings {
	/// JSON file holding user preferences; in-memory only when unset
	pub preferences_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Settings that parse but cannot be used
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("Invalid URL for {field}: {reason}")]
	InvalidUrl { field: String, reason: String },

	#[error("{field} must be greater than zero")]
	ZeroValue { field: String },
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			api: ApiSettings {
				base_url: "http://localhost:8080/api/".to_string(),
				timeout_ms: 15_000,
				token: None,
				user_agent: format!("QuoteDesk/{}", env!("CARGO_PKG_VERSION")),
			},
			share: ShareSettings {
				base_url: "https://cotacao.example.com/c/".to_string(),
			},
			storage: StorageSettings {
				preferences_path: None,
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Compact,
				structured: false,
			},
		}
	}
}

impl Settings {
	/// Check URLs and timeouts before anything is built from them
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		for (field, value) in [
			("api.base_url", &self.api.base_url),
			("share.base_url", &self.share.base_url),
		] {
			Url::parse(value).map_err(|e| ConfigValidationError::InvalidUrl {
				field: field.to_string(),
				reason: e.to_string(),
			})?;
		}

		if self.api.timeout_ms == 0 {
			return Err(ConfigValidationError::ZeroValue {
				field: "api.timeout_ms".to_string(),
			});
		}

		Ok(())
	}

	/// Resolve the API token; `None` when unset or blank
	pub fn api_token(&self) -> Result<Option<SecretString>, ApiTokenError> {
		Ok(self.api.token.as_ref().map(ApiToken::resolve).transpose()?.flatten())
	}
}
