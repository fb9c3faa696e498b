//! Referenced network listing for the surviving products

use quotedesk_types::Refnet;

use crate::selection::SelectedProduct;
use crate::text_search::{fold, SearchQuery};

/// A referenced provider reachable through one product
#[derive(Debug, Clone, PartialEq)]
pub struct RefnetEntry<'a> {
	pub product: SelectedProduct<'a>,
	pub refnet: &'a Refnet,
}

/// Every (product, provider) pair, providers de-duplicated within a product
pub fn refnet_entries<'a>(products: &[SelectedProduct<'a>]) -> Vec<RefnetEntry<'a>> {
	let mut entries = Vec::new();
	for selected in products {
		let mut seen: Vec<&str> = Vec::new();
		for refnet in &selected.product.refnets {
			let key = if refnet.id.is_empty() {
				refnet.name.as_str()
			} else {
				refnet.id.as_str()
			};
			if seen.contains(&key) {
				continue;
			}
			seen.push(key);
			entries.push(RefnetEntry {
				product: *selected,
				refnet,
			});
		}
	}
	entries
}

/// Distinct provider cities, in first-seen order
pub fn refnet_cities(entries: &[RefnetEntry<'_>]) -> Vec<String> {
	let mut cities: Vec<String> = Vec::new();
	for entry in entries {
		if let Some(city) = entry.refnet.city.as_deref().map(str::trim) {
			if !city.is_empty() && !cities.iter().any(|c| fold(c) == fold(city)) {
				cities.push(city.to_string());
			}
		}
	}
	cities
}

/// Filter by provider city and free text over name and specialties
#[derive(Debug, Clone, Default)]
pub struct RefnetFilter {
	city: Option<String>,
	query: Option<SearchQuery>,
}

impl RefnetFilter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_city(mut self, city: impl AsRef<str>) -> Self {
		let city = fold(city.as_ref().trim());
		self.city = (!city.is_empty()).then_some(city);
		self
	}

	pub fn with_query(mut self, query: &str) -> Self {
		let query = SearchQuery::new(query);
		self.query = (!query.is_blank()).then_some(query);
		self
	}

	pub fn matches(&self, refnet: &Refnet) -> bool {
		if let Some(city) = &self.city {
			let in_city = refnet
				.city
				.as_deref()
				.map_or(false, |c| fold(c.trim()) == *city);
			if !in_city {
				return false;
			}
		}
		match &self.query {
			Some(query) => {
				query.matches(&refnet.name)
					|| refnet.expertises.iter().any(|e| query.matches(&e.name))
			},
			None => true,
		}
	}

	pub fn apply<'a>(&self, entries: &[RefnetEntry<'a>]) -> Vec<RefnetEntry<'a>> {
		entries
			.iter()
			.filter(|entry| self.matches(entry.refnet))
			.cloned()
			.collect()
	}
}
