//! Product, service-area city and referenced network models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;
use super::{AgeBracket, BracketPrices, EntityId};
use crate::money::Money;

/// A priced offering under a plan's table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
	#[serde(default)]
	pub id: EntityId,
	#[serde(default, deserialize_with = "lenient::string_or_empty")]
	pub name: String,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub accommodation: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub coverage: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub segment: Option<String>,
	#[serde(default, deserialize_with = "lenient::flag")]
	pub coparticipation: bool,
	#[serde(default, deserialize_with = "lenient::flag")]
	pub refundable: bool,
	#[serde(default, deserialize_with = "lenient::vec_or_empty")]
	pub cities: Vec<City>,
	#[serde(default, deserialize_with = "lenient::vec_or_empty")]
	pub refnets: Vec<Refnet>,
	#[serde(flatten)]
	pub prices: BracketPrices,
}

impl Product {
	pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			..Default::default()
		}
	}

	pub fn with_accommodation(mut self, accommodation: impl Into<String>) -> Self {
		self.accommodation = Some(accommodation.into());
		self
	}

	pub fn with_price(mut self, bracket: AgeBracket, price: Money) -> Self {
		self.prices.set(bracket, Some(price));
		self
	}

	pub fn with_city(mut self, city: City) -> Self {
		self.cities.push(city);
		self
	}

	pub fn with_refnet(mut self, refnet: Refnet) -> Self {
		self.refnets.push(refnet);
		self
	}

	/// Accommodation descriptor, if present and not blank
	pub fn accommodation_label(&self) -> Option<&str> {
		self.accommodation
			.as_deref()
			.map(str::trim)
			.filter(|s| !s.is_empty())
	}

	/// Whether this product lists the given city, matched by id or by name
	pub fn serves(&self, city: &City) -> bool {
		self.cities.iter().any(|c| c.matches(city))
	}
}

/// City in a product's service area
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct City {
	pub id: Option<String>,
	pub name: String,
}

// Accepts either `"Campinas"` or `{"id": 3509502, "name": "Campinas"}`
impl<'de> Deserialize<'de> for City {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Value::deserialize(deserializer)? {
			Value::String(name) => Ok(City::named(name)),
			Value::Object(map) => {
				let id = match map.get("id") {
					Some(Value::String(s)) => Some(s.clone()),
					Some(Value::Number(n)) => Some(n.to_string()),
					_ => None,
				};
				let name = map
					.get("name")
					.and_then(Value::as_str)
					.unwrap_or_default()
					.to_string();
				Ok(City { id, name })
			},
			other => Err(serde::de::Error::custom(format!(
				"expected city, found {}",
				other
			))),
		}
	}
}

impl City {
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			id: None,
			name: name.into(),
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn matches(&self, other: &City) -> bool {
		if let (Some(a), Some(b)) = (&self.id, &other.id) {
			if a == b {
				return true;
			}
		}
		!self.name.is_empty() && self.name.trim() == other.name.trim()
	}
}

/// Referenced healthcare network provider (hospital, clinic, lab)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refnet {
	#[serde(default)]
	pub id: EntityId,
	#[serde(default, deserialize_with = "lenient::string_or_empty")]
	pub name: String,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub city: Option<String>,
	#[serde(default, deserialize_with = "lenient::vec_or_empty")]
	pub expertises: Vec<Expertise>,
}

impl Refnet {
	pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			..Default::default()
		}
	}

	pub fn in_city(mut self, city: impl Into<String>) -> Self {
		self.city = Some(city.into());
		self
	}

	pub fn with_expertise(mut self, name: impl Into<String>) -> Self {
		self.expertises.push(Expertise { name: name.into() });
		self
	}
}

/// Named specialty offered by a referenced provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Expertise {
	pub name: String,
}

// Accepts either `"Cardiologia"` or `{"name": "Cardiologia"}`
impl<'de> Deserialize<'de> for Expertise {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let name = match Value::deserialize(deserializer)? {
			Value::String(s) => s,
			Value::Object(map) => map
				.get("name")
				.and_then(Value::as_str)
				.unwrap_or_default()
				.to_string(),
			other => {
				return Err(serde::de::Error::custom(format!(
					"expected expertise name, found {}",
					other
				)))
			},
		};
		Ok(Self { name })
	}
}
