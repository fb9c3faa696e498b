//! Request and response bodies exchanged with the quote backend

use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ApiError, ApiResult};
use crate::quotes::{lenient, EntityId};

/// Row of the quote listing screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteListItem {
	#[serde(default)]
	pub id: EntityId,
	#[serde(default, deserialize_with = "lenient::string_or_empty")]
	pub slug: String,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub client_name: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_datetime")]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default, deserialize_with = "lenient::count")]
	pub plan_count: u32,
}

impl QuoteListItem {
	/// Decode a listing payload, which may be a bare array or `{"quotes": [...]}`
	pub fn list_from_value(value: serde_json::Value) -> Vec<QuoteListItem> {
		match value {
			serde_json::Value::Object(mut map) => map
				.remove("quotes")
				.or_else(|| map.remove("data"))
				.map(lenient::vec_from_value)
				.unwrap_or_default(),
			other => lenient::vec_from_value(other),
		}
	}
}

/// Body of a product removal request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveProductsRequest {
	pub product_ids: Vec<EntityId>,
}

/// Body of a client rename request; `null` clears the name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameClientRequest {
	pub client_name: Option<String>,
}

/// Response of a duplicate request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateQuoteResponse {
	pub id: EntityId,
}

/// Display flags forwarded to the PDF renderer
///
/// The effect of each flag is decided server-side, so the bag is passed
/// through unchanged and the client attaches no meaning to individual keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PdfOptions(BTreeMap<String, bool>);

impl PdfOptions {
	/// Flags the quote screen exposes, in the order it shows them
	pub const KNOWN_FLAGS: [&'static str; 9] = [
		"showPrices",
		"showNetwork",
		"showCoparticipation",
		"showGracePeriod",
		"showRefund",
		"showAssociations",
		"showNeededDocuments",
		"showDiscounts",
		"showBrokerInfo",
	];

	pub fn new() -> Self {
		Self::default()
	}

	/// Every known flag switched on
	pub fn all_enabled() -> Self {
		Self(
			Self::KNOWN_FLAGS
				.iter()
				.map(|flag| (flag.to_string(), true))
				.collect(),
		)
	}

	pub fn set(mut self, flag: impl Into<String>, enabled: bool) -> Self {
		self.0.insert(flag.into(), enabled);
		self
	}

	pub fn get(&self, flag: &str) -> Option<bool> {
		self.0.get(flag).copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
		self.0.iter().map(|(k, v)| (k.as_str(), *v))
	}
}

/// Body of a PDF generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratePdfRequest {
	pub options: PdfOptions,
}

/// Base64 encoded document returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfDocument {
	#[serde(alias = "base64", alias = "pdf")]
	pub content: String,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub file_name: Option<String>,
}

impl PdfDocument {
	/// Decode the payload, tolerating a `data:` URI prefix
	pub fn decode(&self) -> ApiResult<Vec<u8>> {
		let raw = match self.content.split_once("base64,") {
			Some((_, data)) => data,
			None => self.content.as_str(),
		};
		let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
		BASE64_STANDARD
			.decode(compact)
			.map_err(|e| ApiError::InvalidResponse {
				reason: format!("PDF payload is not valid base64: {}", e),
			})
	}

	/// File name to save under, falling back to the quote slug
	pub fn file_name_or(&self, slug: &str) -> String {
		match self.file_name.as_deref().map(str::trim) {
			Some(name) if !name.is_empty() => name.to_string(),
			_ => format!("cotacao-{}.pdf", slug),
		}
	}
}
