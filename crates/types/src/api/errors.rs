//! Error types for remote API operations

use thiserror::Error;

/// Failures talking to the quote backend
#[derive(Error, Debug)]
pub enum ApiError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatus { status_code: u16, reason: String },

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Configuration error: {reason}")]
	Config { reason: String },

	#[error("Invalid request: {reason}")]
	InvalidRequest { reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Network error: {0}")]
	Network(String),
}

impl ApiError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			ApiError::HttpStatus { status_code, .. } => Some(*status_code),
			ApiError::Http(reqwest_error) => reqwest_error.status().map(|status| status.as_u16()),
			_ => None,
		}
	}

	/// Whether the backend reported the resource as missing
	pub fn is_not_found(&self) -> bool {
		self.status_code() == Some(404)
	}

	/// Create an HTTP failure error with the given status code and reason
	pub fn http_failure(status_code: u16, reason: impl Into<String>) -> Self {
		Self::HttpStatus {
			status_code,
			reason: reason.into(),
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			409 => "Conflict".to_string(),
			422 => "Unprocessable Entity".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatus {
			status_code,
			reason,
		}
	}

	/// Message suitable for an inline alert
	pub fn user_message(&self) -> String {
		match self {
			ApiError::HttpStatus {
				status_code: 401 | 403,
				..
			} => "Sua sessão expirou. Entre novamente.".to_string(),
			ApiError::HttpStatus {
				status_code: 404, ..
			} => "Cotação não encontrada.".to_string(),
			ApiError::Timeout { .. } | ApiError::Http(_) | ApiError::Network(_) => {
				"Não foi possível conectar ao servidor. Tente novamente.".to_string()
			},
			_ => "Ocorreu um erro inesperado. Tente novamente.".to_string(),
		}
	}
}
