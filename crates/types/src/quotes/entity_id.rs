//! Identifiers that may arrive as JSON strings or integers

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Backend identifier, compared by its canonical string form
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for EntityId {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for EntityId {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<u64> for EntityId {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

impl Serialize for EntityId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for EntityId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Value::deserialize(deserializer)? {
			Value::String(s) => Ok(Self(s.trim().to_string())),
			Value::Number(n) => Ok(Self(n.to_string())),
			Value::Null => Ok(Self::default()),
			other => Err(serde::de::Error::custom(format!(
				"expected string or number identifier, found {}",
				other
			))),
		}
	}
}
