//! Lenient deserializers for backend quote payloads
//!
//! The backend schema is not owned by this client and may omit fields, send
//! `null`, encode numbers as strings or replace a list with a scalar. Every
//! optional or dynamic field of the quote model goes through one of these
//! helpers so that defaulting happens in a single place.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::money::Money;
use crate::quotes::QuoteType;

/// Deserialize a list, treating `null` or a non-array value as empty
///
/// Elements that fail to decode are skipped.
pub fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	let value = Value::deserialize(deserializer)?;
	Ok(vec_from_value(value))
}

pub(crate) fn vec_from_value<T: DeserializeOwned>(value: Value) -> Vec<T> {
	match value {
		Value::Array(items) => items
			.into_iter()
			.filter_map(|item| match serde_json::from_value::<T>(item) {
				Ok(decoded) => Some(decoded),
				Err(e) => {
					debug!("Skipping malformed list element: {}", e);
					None
				},
			})
			.collect(),
		Value::Null => Vec::new(),
		other => {
			debug!("Expected array, found {}; treating as empty", value_kind(&other));
			Vec::new()
		},
	}
}

/// Deserialize an optional string, accepting numbers and treating anything else as absent
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(match value {
		Value::String(s) => Some(s),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	})
}

/// Deserialize a string, defaulting to empty
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// Deserialize a headcount; negative, fractional or unparsable values clamp to a sane count
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(count_from_value(&value))
}

fn count_from_value(value: &Value) -> u32 {
	match value {
		Value::Number(n) => {
			if let Some(v) = n.as_u64() {
				u32::try_from(v).unwrap_or(u32::MAX)
			} else if let Some(v) = n.as_f64() {
				if v.is_finite() && v > 0.0 {
					v.trunc().min(u32::MAX as f64) as u32
				} else {
					0
				}
			} else {
				0
			}
		},
		Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
		_ => 0,
	}
}

/// Deserialize an optional price in reais into exact centavos
pub fn opt_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(match value {
		Value::Number(n) => n.as_f64().and_then(Money::from_decimal),
		Value::String(s) => Money::parse(&s),
		_ => None,
	})
}

/// Deserialize a flag that may arrive as a bool, number or string
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(match value {
		Value::Bool(b) => b,
		Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
		Value::String(s) => matches!(
			s.trim().to_ascii_lowercase().as_str(),
			"true" | "1" | "sim" | "yes"
		),
		_ => false,
	})
}

/// Deserialize a plan type discriminator; unknown values are treated as absent
pub fn opt_quote_type<'de, D>(deserializer: D) -> Result<Option<QuoteType>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(match value {
		Value::String(s) => s.parse::<QuoteType>().ok(),
		_ => None,
	})
}

/// Deserialize an optional RFC 3339 timestamp; unparsable values are treated as absent
pub fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(match value {
		Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
			.map(|dt| dt.with_timezone(&Utc))
			.ok(),
		_ => None,
	})
}

fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
