//! Where the backend bearer token comes from
//!
//! The token is configured as `{"type": "env" | "file" | "plain", "value": ...}`
//! or the short string forms `env:NAME`, `file:/path` and a bare token.
//! Resolution trims surrounding whitespace and treats a blank token as no
//! token at all, so an exported but empty variable does not send
//! `Authorization: Bearer `.

use quotedesk_types::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Configured source of the API token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(from = "TokenRepr")]
pub struct ApiToken {
	#[serde(rename = "type")]
	pub source: TokenSource,
	/// Variable name, file path or the token itself
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
	/// Environment variable named by `value`
	Env,
	/// File whose contents are the token, as mounted secrets are
	File,
	/// Token written into the config file
	Plain,
}

/// Accepts the short string form as well, which is what
/// `QUOTEDESK__API__TOKEN=env:NAME` arrives as
#[derive(Deserialize)]
#[serde(untagged)]
enum TokenRepr {
	Short(String),
	Full {
		#[serde(rename = "type")]
		source: TokenSource,
		value: String,
	},
}

impl From<TokenRepr> for ApiToken {
	fn from(repr: TokenRepr) -> Self {
		match repr {
			TokenRepr::Short(value) => ApiToken::from(value),
			TokenRepr::Full { source, value } => Self { source, value },
		}
	}
}

impl ApiToken {
	pub fn from_env(var_name: &str) -> Self {
		Self {
			source: TokenSource::Env,
			value: var_name.to_string(),
		}
	}

	pub fn from_file(path: &str) -> Self {
		Self {
			source: TokenSource::File,
			value: path.to_string(),
		}
	}

	pub fn from_plain(token: &str) -> Self {
		Self {
			source: TokenSource::Plain,
			value: token.to_string(),
		}
	}

	/// Resolve the bearer token; `Ok(None)` when the source holds only whitespace
	pub fn resolve(&self) -> Result<Option<SecretString>, ApiTokenError> {
		let raw = match self.source {
			TokenSource::Env => std::env::var(&self.value)
				.map_err(|_| ApiTokenError::EnvironmentVariableNotFound(self.value.clone()))?,
			TokenSource::File => {
				std::fs::read_to_string(&self.value).map_err(|e| ApiTokenError::Unreadable {
					path: self.value.clone(),
					reason: e.to_string(),
				})?
			},
			TokenSource::Plain => self.value.clone(),
		};
		if self.is_plain() {
			warn!("API token is stored in plain text in the config file; use env: or file: instead");
		}

		let token = raw.trim();
		if token.is_empty() {
			debug!("API token from {} is blank, sending no credentials", self.description());
			return Ok(None);
		}
		if token.chars().any(char::is_whitespace) {
			return Err(ApiTokenError::Malformed(self.description()));
		}
		Ok(Some(SecretString::new(token.to_string())))
	}

	/// Whether the token itself sits in the config file
	pub fn is_plain(&self) -> bool {
		self.source == TokenSource::Plain
	}

	/// Where the token is read from, never the token itself
	pub fn description(&self) -> String {
		match self.source {
			TokenSource::Env => format!("environment variable '{}'", self.value),
			TokenSource::File => format!("file '{}'", self.value),
			TokenSource::Plain => "plain value in config file".to_string(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ApiTokenError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),

	#[error("Cannot read API token file '{path}': {reason}")]
	Unreadable { path: String, reason: String },

	#[error("API token from {0} contains whitespace")]
	Malformed(String),
}

impl fmt::Display for ApiToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.source {
			TokenSource::Env => write!(f, "env:{}", self.value),
			TokenSource::File => write!(f, "file:{}", self.value),
			TokenSource::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

impl From<&str> for ApiToken {
	fn from(value: &str) -> Self {
		if let Some(var_name) = value.strip_prefix("env:") {
			Self::from_env(var_name)
		} else if let Some(path) = value.strip_prefix("file:") {
			Self::from_file(path)
		} else {
			Self::from_plain(value)
		}
	}
}

impl From<String> for ApiToken {
	fn from(value: String) -> Self {
		ApiToken::from(value.as_str())
	}
}
