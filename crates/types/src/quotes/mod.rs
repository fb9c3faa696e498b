//! Quote snapshot model
//!
//! A quote is fetched whole from the backend and treated as a read-only
//! snapshot. Local edits never mutate a snapshot in place; they build a new
//! one (see [`Quote::without_products`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod age_bracket;
pub mod entity_id;
pub mod errors;
pub mod lenient;
pub mod plan;
pub mod product;
pub mod quote_type;

pub use age_bracket::{AgeBracket, BracketCounts, BracketPrices};
pub use entity_id::EntityId;
pub use errors::{QuoteError, QuoteValidationError};
pub use plan::{NoteTab, Plan, Table};
pub use product::{City, Expertise, Product, Refnet};
pub use quote_type::QuoteType;

/// Result type for quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Result type for quote validation operations
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;

/// Longest client name accepted before a rename is sent
pub const MAX_CLIENT_NAME_LEN: usize = 120;

/// A named set of plan comparisons prepared for a prospective client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	#[serde(default)]
	pub id: EntityId,
	#[serde(default, deserialize_with = "lenient::string_or_empty")]
	pub slug: String,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub client_name: Option<String>,
	/// Empty means every product is selected
	#[serde(default, deserialize_with = "lenient::vec_or_empty")]
	pub selected_product_ids: Vec<EntityId>,
	#[serde(default, deserialize_with = "lenient::vec_or_empty")]
	pub plans: Vec<Plan>,
	#[serde(flatten)]
	pub headcounts: BracketCounts,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub share_url: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_datetime")]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default, deserialize_with = "lenient::opt_datetime")]
	pub updated_at: Option<DateTime<Utc>>,
	/// Set when a local removal emptied a non-empty selection; the empty id
	/// list then selects nothing instead of everything
	#[serde(skip)]
	pub selection_exhausted: bool,
}

impl Quote {
	pub fn new(id: impl Into<EntityId>, slug: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			slug: slug.into(),
			..Default::default()
		}
	}

	/// Decode a snapshot from a backend JSON payload
	pub fn from_json(payload: &str) -> QuoteResult<Self> {
		Ok(serde_json::from_str(payload)?)
	}

	/// Decode a snapshot from an already parsed JSON value
	pub fn from_value(value: serde_json::Value) -> QuoteResult<Self> {
		Ok(serde_json::from_value(value)?)
	}

	pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
		self.client_name = Some(name.into());
		self
	}

	pub fn with_plan(mut self, plan: Plan) -> Self {
		self.plans.push(plan);
		self
	}

	pub fn with_lives(mut self, bracket: AgeBracket, lives: u32) -> Self {
		self.headcounts.set(bracket, lives);
		self
	}

	pub fn with_selected(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
		self.selected_product_ids = ids.into_iter().collect();
		self.selection_exhausted = false;
		self
	}

	/// Client name, if present and not blank
	pub fn client_label(&self) -> Option<&str> {
		self.client_name
			.as_deref()
			.map(str::trim)
			.filter(|s| !s.is_empty())
	}

	/// Plans belonging to one track, in order
	pub fn plans_of_type(&self, quote_type: QuoteType) -> impl Iterator<Item = &Plan> {
		self.plans
			.iter()
			.filter(move |plan| plan.effective_type() == quote_type)
	}

	/// Every product of every plan, in plan and table order
	pub fn products(&self) -> impl Iterator<Item = (&Plan, &Product)> {
		self.plans
			.iter()
			.flat_map(|plan| plan.products().map(move |(_, product)| (plan, product)))
	}

	pub fn product_count(&self) -> usize {
		self.products().count()
	}

	pub fn find_product(&self, product_id: &EntityId) -> Option<(&Plan, &Product)> {
		self.products().find(|(_, product)| &product.id == product_id)
	}

	/// Build a new snapshot with the given products removed from every table
	/// and from the selection
	pub fn without_products(&self, product_ids: &[EntityId]) -> Quote {
		let mut next = self.clone();
		for plan in &mut next.plans {
			for table in &mut plan.tables {
				table
					.products
					.retain(|product| !product_ids.contains(&product.id));
			}
		}
		let had_selection = !next.selected_product_ids.is_empty();
		next.selected_product_ids
			.retain(|id| !product_ids.contains(id));
		if had_selection && next.selected_product_ids.is_empty() {
			next.selection_exhausted = true;
		}
		next
	}

	/// Validate and normalise a client name before it is sent to the backend
	///
	/// Blank input clears the name.
	pub fn normalize_client_name(name: Option<&str>) -> QuoteValidationResult<Option<String>> {
		let trimmed = match name.map(str::trim) {
			None | Some("") => return Ok(None),
			Some(trimmed) => trimmed,
		};

		if trimmed.chars().count() > MAX_CLIENT_NAME_LEN {
			return Err(QuoteValidationError::InvalidClientName {
				reason: format!("longer than {} characters", MAX_CLIENT_NAME_LEN),
			});
		}
		if trimmed.chars().any(char::is_control) {
			return Err(QuoteValidationError::InvalidClientName {
				reason: "contains control characters".to_string(),
			});
		}

		Ok(Some(trimmed.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::money::Money;
	use serde_json::json;

	fn sample_payload() -> serde_json::Value {
		json!({
			"id": 10,
			"slug": "cotacao-abc",
			"clientName": null,
			"selectedProductIds": [1, "3"],
			"lives0To18": 2,
			"lives29To33": "1",
			"createdAt": "2024-05-01T12:00:00Z",
			"plans": [
				{
					"id": 100,
					"name": "Plano Saúde",
					"manager": "Operadora X",
					"tables": [
						{ "id": 1, "products": [
							{ "id": 1, "name": "Enfermaria", "price0To18": 100.0 },
							{ "id": 2, "name": "Apartamento", "price0To18": "150,00" }
						]}
					]
				},
				{
					"id": 200,
					"name": "Plano Odonto",
					"quoteType": "ODONTO",
					"tables": [ { "id": 2, "products": [ { "id": 3, "name": "Dental" } ] } ]
				}
			]
		})
	}

	#[test]
	fn test_quote_from_payload() {
		let quote = Quote::from_value(sample_payload()).unwrap();

		assert_eq!(quote.id.as_str(), "10");
		assert_eq!(quote.client_label(), None);
		assert_eq!(quote.headcounts.get(AgeBracket::From0To18), 2);
		assert_eq!(quote.headcounts.get(AgeBracket::From29To33), 1);
		assert_eq!(quote.product_count(), 3);
		assert_eq!(quote.selected_product_ids, vec![EntityId::from("1"), EntityId::from("3")]);
		assert!(quote.created_at.is_some());

		let (plan, product) = quote.find_product(&EntityId::from("2")).unwrap();
		assert_eq!(plan.name, "Plano Saúde");
		assert_eq!(
			product.prices.get(AgeBracket::From0To18),
			Some(Money::from_cents(15_000))
		);
	}

	#[test]
	fn test_malformed_plans_yield_empty_quote() {
		let quote = Quote::from_value(json!({ "id": 1, "plans": "broken" })).unwrap();
		assert!(quote.plans.is_empty());
		assert_eq!(quote.product_count(), 0);
	}

	#[test]
	fn test_plans_of_type() {
		let quote = Quote::from_value(sample_payload()).unwrap();
		assert_eq!(quote.plans_of_type(QuoteType::Health).count(), 1);
		assert_eq!(quote.plans_of_type(QuoteType::Odonto).count(), 1);
	}

	#[test]
	fn test_without_products_builds_new_snapshot() {
		let quote = Quote::from_value(sample_payload()).unwrap();
		let removed = [EntityId::from("1")];
		let next = quote.without_products(&removed);

		assert_eq!(quote.product_count(), 3);
		assert_eq!(next.product_count(), 2);
		assert_eq!(next.selected_product_ids, vec![EntityId::from("3")]);
		assert!(next.find_product(&EntityId::from("1")).is_none());
		assert!(!next.selection_exhausted);
	}

	#[test]
	fn test_removing_whole_selection_marks_it_exhausted() {
		let quote = Quote::from_value(sample_payload()).unwrap();
		let next = quote.without_products(&[EntityId::from("1"), EntityId::from("3")]);
		assert!(next.selected_product_ids.is_empty());
		assert!(next.selection_exhausted);

		let untouched = Quote::new("1", "q").without_products(&[EntityId::from("9")]);
		assert!(!untouched.selection_exhausted);
	}

	#[test]
	fn test_normalize_client_name() {
		assert_eq!(Quote::normalize_client_name(None).unwrap(), None);
		assert_eq!(Quote::normalize_client_name(Some("   ")).unwrap(), None);
		assert_eq!(
			Quote::normalize_client_name(Some("  Maria Silva ")).unwrap(),
			Some("Maria Silva".to_string())
		);

		let long = "x".repeat(MAX_CLIENT_NAME_LEN + 1);
		assert!(matches!(
			Quote::normalize_client_name(Some(&long)),
			Err(QuoteValidationError::InvalidClientName { .. })
		));
	}
}
