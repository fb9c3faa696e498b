//! reqwest implementation of the quote backend API

use async_trait::async_trait;
use quotedesk_config::Settings;
use quotedesk_types::{
	ApiError, ApiResult, DuplicateQuoteResponse, EntityId, GeneratePdfRequest, PdfDocument,
	PdfOptions, Quote, QuoteApi, QuoteListItem, RemoveProductsRequest, RenameClientRequest,
	SecretString,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// HTTP client for the quote backend
#[derive(Debug, Clone)]
pub struct HttpQuoteApi {
	client: Client,
	base_url: Url,
	timeout_ms: u64,
}

impl HttpQuoteApi {
	/// Build a client for `base_url`, authenticating with `token` when given
	pub fn new(
		base_url: &str,
		timeout_ms: u64,
		token: Option<SecretString>,
		user_agent: &str,
	) -> ApiResult<Self> {
		let base_url = parse_base_url(base_url)?;

		let mut headers = HeaderMap::new();
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.insert(
			USER_AGENT,
			HeaderValue::from_str(user_agent).map_err(|e| ApiError::Config {
				reason: format!("Invalid user agent '{}': {}", user_agent, e),
			})?,
		);
		if let Some(token) = token.filter(|t| !t.is_empty()) {
			let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
				.map_err(|_| ApiError::Config {
					reason: "API token contains invalid header characters".to_string(),
				})?;
			value.set_sensitive(true);
			headers.insert(AUTHORIZATION, value);
		}

		let client = Client::builder()
			.default_headers(headers)
			.timeout(Duration::from_millis(timeout_ms))
			.build()?;

		Ok(Self {
			client,
			base_url,
			timeout_ms,
		})
	}

	/// Build a client from application settings
	pub fn from_settings(settings: &Settings) -> ApiResult<Self> {
		let token = settings.api_token().map_err(|e| ApiError::Config {
			reason: e.to_string(),
		})?;
		Self::new(
			&settings.api.base_url,
			settings.api.timeout_ms,
			token,
			&settings.api.user_agent,
		)
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Append `segments` to the base path, each one percent-encoded as a
	/// single segment
	pub fn url(&self, segments: &[&str]) -> ApiResult<Url> {
		if let Some(bad) = segments
			.iter()
			.find(|segment| matches!(segment.trim(), "" | "." | ".."))
		{
			return Err(ApiError::InvalidRequest {
				reason: format!("'{}' is not a valid path segment", bad),
			});
		}

		let mut url = self.base_url.clone();
		url.path_segments_mut()
			.map_err(|_| ApiError::Config {
				reason: format!("Base URL '{}' cannot carry a path", self.base_url),
			})?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}

	fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
		let url = self.url(segments)?;
		debug!("{} {}", method, url);
		Ok(self.client.request(method, url))
	}

	/// Send a request and turn transport failures and non-2xx statuses into errors
	async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
		let response = request.send().await.map_err(|e| self.map_transport_error(e))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			warn!("Backend returned HTTP {}: {}", status.as_u16(), truncate(&body, 200));
			return Err(match extract_message(&body) {
				Some(message) => ApiError::http_failure(status.as_u16(), message),
				None => ApiError::from_http_failure(status.as_u16()),
			});
		}

		Ok(response)
	}

	async fn read_body(&self, response: Response) -> ApiResult<String> {
		response.text().await.map_err(|e| self.map_transport_error(e))
	}

	fn map_transport_error(&self, error: reqwest::Error) -> ApiError {
		if error.is_timeout() {
			ApiError::Timeout {
				timeout_ms: self.timeout_ms,
			}
		} else if error.is_connect() {
			ApiError::Network(error.to_string())
		} else {
			ApiError::Http(error)
		}
	}
}

#[async_trait]
impl QuoteApi for HttpQuoteApi {
	async fn list_quotes(&self) -> ApiResult<Vec<QuoteListItem>> {
		let response = self.send(self.request(Method::GET, &["quotes"])?).await?;
		let body = self.read_body(response).await?;
		let value: Value = serde_json::from_str(&body)?;
		Ok(QuoteListItem::list_from_value(value))
	}

	async fn fetch_quote(&self, quote_id: &EntityId) -> ApiResult<Quote> {
		let path = ["quotes", quote_id.as_str()];
		let response = self.send(self.request(Method::GET, &path)?).await?;
		let body = self.read_body(response).await?;
		let value: Value = serde_json::from_str(&body)?;
		let quote = Quote::from_value(unwrap_envelope(value, "quote")).map_err(|e| {
			ApiError::InvalidResponse {
				reason: format!("Malformed quote {}: {}", quote_id, e),
			}
		})?;
		debug!(
			"Fetched quote {} with {} plans",
			quote.id,
			quote.plans.len()
		);
		Ok(quote)
	}

	async fn remove_products(
		&self,
		quote_id: &EntityId,
		product_ids: &[EntityId],
	) -> ApiResult<Option<Quote>> {
		let path = ["quotes", quote_id.as_str(), "products"];
		let body = RemoveProductsRequest {
			product_ids: product_ids.to_vec(),
		};
		let response = self
			.send(self.request(Method::DELETE, &path)?.json(&body))
			.await?;
		let text = self.read_body(response).await?;
		info!(
			"Removed {} product(s) from quote {}",
			product_ids.len(),
			quote_id
		);
		Ok(parse_optional_quote(&text))
	}

	async fn rename_client(
		&self,
		quote_id: &EntityId,
		client_name: Option<String>,
	) -> ApiResult<()> {
		let path = ["quotes", quote_id.as_str()];
		let body = RenameClientRequest { client_name };
		self.send(self.request(Method::PATCH, &path)?.json(&body))
			.await?;
		info!("Updated client name of quote {}", quote_id);
		Ok(())
	}

	async fn duplicate_quote(&self, quote_id: &EntityId) -> ApiResult<EntityId> {
		let path = ["quotes", quote_id.as_str(), "duplicate"];
		let response = self.send(self.request(Method::POST, &path)?).await?;
		let text = self.read_body(response).await?;
		let new_id = parse_duplicate_id(&text)?;
		info!("Duplicated quote {} into {}", quote_id, new_id);
		Ok(new_id)
	}

	async fn delete_quote(&self, quote_id: &EntityId) -> ApiResult<()> {
		let path = ["quotes", quote_id.as_str()];
		self.send(self.request(Method::DELETE, &path)?).await?;
		info!("Deleted quote {}", quote_id);
		Ok(())
	}

	async fn generate_pdf(
		&self,
		quote_id: &EntityId,
		options: &PdfOptions,
	) -> ApiResult<PdfDocument> {
		let path = ["quotes", quote_id.as_str(), "pdf"];
		let body = GeneratePdfRequest {
			options: options.clone(),
		};
		let response = self
			.send(self.request(Method::POST, &path)?.json(&body))
			.await?;
		let text = self.read_body(response).await?;
		let document: PdfDocument =
			serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse {
				reason: format!("Malformed PDF response: {}", e),
			})?;
		Ok(document)
	}
}

fn parse_base_url(base_url: &str) -> ApiResult<Url> {
	let mut base = Url::parse(base_url).map_err(|e| ApiError::Config {
		reason: format!("Invalid base URL '{}': {}", base_url, e),
	})?;

	// Stored as a directory so `base_url()` reads the same with or without a trailing slash
	if !base.path().ends_with('/') {
		base.set_path(&format!("{}/", base.path()));
	}
	Ok(base)
}

/// Accept both `{...}` and `{"quote": {...}}` envelopes
fn unwrap_envelope(value: Value, key: &str) -> Value {
	match value {
		Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
		other => other,
	}
}

/// The removal endpoint may answer with the updated quote, a bare
/// acknowledgement or nothing at all
fn parse_optional_quote(body: &str) -> Option<Quote> {
	if body.trim().is_empty() {
		return None;
	}
	let value = unwrap_envelope(serde_json::from_str::<Value>(body).ok()?, "quote");
	let looks_like_quote = value
		.as_object()
		.map(|map| map.contains_key("plans"))
		.unwrap_or(false);
	if !looks_like_quote {
		return None;
	}
	Quote::from_value(value).ok()
}

fn parse_duplicate_id(body: &str) -> ApiResult<EntityId> {
	let value = unwrap_envelope(serde_json::from_str::<Value>(body)?, "quote");
	let response: DuplicateQuoteResponse =
		serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse {
			reason: format!("Duplicate response has no id: {}", e),
		})?;
	if response.id.is_empty() {
		return Err(ApiError::InvalidResponse {
			reason: "Duplicate response has an empty id".to_string(),
		});
	}
	Ok(response.id)
}

fn extract_message(body: &str) -> Option<String> {
	let value: Value = serde_json::from_str(body).ok()?;
	["message", "error"]
		.iter()
		.find_map(|key| value.get(*key).and_then(Value::as_str))
		.map(str::to_string)
}

fn truncate(text: &str, max_chars: usize) -> String {
	text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn api(base: &str) -> HttpQuoteApi {
		HttpQuoteApi::new(base, 1_000, Some(SecretString::from("tok")), "QuoteDesk/test").unwrap()
	}

	#[test]
	fn test_url_joining_keeps_base_path() {
		let client = api("https://api.example.com/v1");
		assert_eq!(
			client.url(&["quotes", "10"]).unwrap().as_str(),
			"https://api.example.com/v1/quotes/10"
		);
		assert_eq!(
			api("https://api.example.com/v1/")
				.url(&["quotes", "10", "pdf"])
				.unwrap()
				.as_str(),
			"https://api.example.com/v1/quotes/10/pdf"
		);
	}

	#[test]
	fn test_quote_id_is_a_single_path_segment() {
		let client = api("https://api.example.com/v1");
		let url = client.url(&["quotes", "../admin/users?x=", "pdf"]).unwrap();
		assert_eq!(
			url.as_str(),
			"https://api.example.com/v1/quotes/..%2Fadmin%2Fusers%3Fx=/pdf"
		);
		assert_eq!(url.query(), None);
		assert_eq!(url.path_segments().unwrap().count(), 4);

		let url = client.url(&["quotes", "a b#c"]).unwrap();
		assert_eq!(url.path(), "/v1/quotes/a%20b%23c");
		assert_eq!(url.fragment(), None);
	}

	#[test]
	fn test_dot_segments_are_rejected() {
		let client = api("https://api.example.com/v1");
		for id in ["..", ".", "", "  "] {
			assert!(matches!(
				client.url(&["quotes", id]),
				Err(ApiError::InvalidRequest { .. })
			));
		}
	}

	#[test]
	fn test_invalid_base_url() {
		let result = HttpQuoteApi::new("::nope::", 1_000, None, "QuoteDesk/test");
		assert!(matches!(result, Err(ApiError::Config { .. })));
	}

	#[test]
	fn test_parse_optional_quote() {
		assert!(parse_optional_quote("").is_none());
		assert!(parse_optional_quote("{\"ok\":true}").is_none());
		assert!(parse_optional_quote("not json").is_none());

		let quote = parse_optional_quote(r#"{"quote":{"id":1,"plans":[]}}"#).unwrap();
		assert_eq!(quote.id.as_str(), "1");

		let quote = parse_optional_quote(r#"{"id":2,"plans":[]}"#).unwrap();
		assert_eq!(quote.id.as_str(), "2");
	}

	#[test]
	fn test_parse_duplicate_id() {
		assert_eq!(parse_duplicate_id(r#"{"id":77}"#).unwrap().as_str(), "77");
		assert_eq!(
			parse_duplicate_id(r#"{"quote":{"id":"abc"}}"#).unwrap().as_str(),
			"abc"
		);
		assert!(matches!(
			parse_duplicate_id(r#"{"id":""}"#),
			Err(ApiError::InvalidResponse { .. })
		));
		assert!(parse_duplicate_id("[]").is_err());
	}

	#[test]
	fn test_extract_message() {
		assert_eq!(
			extract_message(r#"{"message":"Quote locked"}"#).as_deref(),
			Some("Quote locked")
		);
		assert_eq!(extract_message("<html>"), None);
	}

	#[tokio::test]
	async fn test_unreachable_backend_is_a_network_error() {
		// Port 9 (discard) is closed on test machines
		let client = api("http://127.0.0.1:9/api/");
		let error = client.fetch_quote(&EntityId::from("1")).await.unwrap_err();
		assert!(matches!(
			error,
			ApiError::Network(_) | ApiError::Timeout { .. } | ApiError::Http(_)
		));
	}
}
