//! City by product pivot of the surviving products' service areas

use quotedesk_types::City;
use tracing::debug;

use crate::selection::SelectedProduct;
use crate::text_search::SearchQuery;

/// Which surviving product serves which city
///
/// Rows are cities in first-seen order, columns are products in the order
/// they were given.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesAreaMatrix<'a> {
	cities: Vec<City>,
	products: Vec<SelectedProduct<'a>>,
	cells: Vec<Vec<bool>>,
}

impl<'a> SalesAreaMatrix<'a> {
	/// Build the matrix over a flattened product list
	pub fn build(products: &[SelectedProduct<'a>]) -> Self {
		let mut cities: Vec<City> = Vec::new();
		for selected in products {
			for city in &selected.product.cities {
				let name = city.name.trim();
				if name.is_empty() || cities.iter().any(|c| c.name == name) {
					continue;
				}
				cities.push(City {
					id: city.id.clone(),
					name: name.to_string(),
				});
			}
		}

		let cells = cities
			.iter()
			.map(|city| {
				products
					.iter()
					.map(|selected| selected.product.serves(city))
					.collect()
			})
			.collect();

		debug!(
			"Sales area: {} cities x {} products",
			cities.len(),
			products.len()
		);
		Self {
			cities,
			products: products.to_vec(),
			cells,
		}
	}

	pub fn cities(&self) -> &[City] {
		&self.cities
	}

	pub fn products(&self) -> &[SelectedProduct<'a>] {
		&self.products
	}

	pub fn is_empty(&self) -> bool {
		self.cities.is_empty()
	}

	/// Whether the product in column `col` serves the city in row `row`
	pub fn serves(&self, row: usize, col: usize) -> bool {
		self.cells
			.get(row)
			.and_then(|cells| cells.get(col))
			.copied()
			.unwrap_or(false)
	}

	pub fn rows(&self) -> impl Iterator<Item = (&City, &[bool])> {
		self.cities
			.iter()
			.zip(self.cells.iter().map(Vec::as_slice))
	}

	/// Keep the rows whose city name contains `query`, ignoring accents and case
	pub fn filter(&self, query: &str) -> SalesAreaMatrix<'a> {
		let query = SearchQuery::new(query);
		let (cities, cells): (Vec<City>, Vec<Vec<bool>>) = self
			.cities
			.iter()
			.zip(&self.cells)
			.filter(|(city, _)| query.matches(&city.name))
			.map(|(city, cells)| (city.clone(), cells.clone()))
			.unzip();

		SalesAreaMatrix {
			cities,
			products: self.products.clone(),
			cells,
		}
	}
}
