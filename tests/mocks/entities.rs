//! Domain entity mocks for testing

use quotedesk::serde_json::{json, Value};
use quotedesk::{AgeBracket, Money, Plan, Product, Quote, QuoteType, Table};

/// Backend payloads as the quote API sends them
#[allow(dead_code)]
pub struct MockPayloads;

#[allow(dead_code)]
impl MockPayloads {
	/// Health plan with two products (0-18: 2 lives at 100.00) and a dental
	/// plan with one unpriced product
	pub fn two_track_quote() -> Value {
		json!({
			"id": 501,
			"slug": "cotacao-501",
			"clientName": null,
			"selectedProductIds": [],
			"lives0To18": 2,
			"lives19To23": 0,
			"plans": [
				{
					"id": 1,
					"name": "Bradesco Saúde Efetivo",
					"manager": "Bradesco",
					"quoteType": "HEALTH",
					"tables": [
						{
							"id": 10,
							"name": "PME",
							"products": [
								{
									"id": 100,
									"name": "Efetivo Enfermaria",
									"accommodation": "Enfermaria",
									"price0To18": 100.0,
									"price19To23": 130.5,
									"cities": ["São Paulo", { "id": 3509502, "name": "Campinas" }]
								},
								{
									"id": 101,
									"name": "Efetivo Apartamento",
									"accommodation": "Apartamento",
									"price0To18": "120,00",
									"cities": [{ "name": "São Paulo" }]
								}
							]
						}
					]
				},
				{
					"id": 2,
					"name": "Dental Uni",
					"quoteType": "ODONTO",
					"tables": [
						{ "id": 20, "products": [ { "id": 200, "name": "Dental Básico", "price0To18": null } ] }
					]
				}
			]
		})
	}

	/// Single health plan with two products and no client name
	pub fn single_health_plan() -> Value {
		json!({
			"id": "q-9",
			"slug": "abc-9",
			"plans": [
				{
					"id": 7,
					"name": "SulAmérica Direto",
					"manager": "SulAmérica",
					"tables": [
						{
							"id": 70,
							"products": [
								{ "id": 700, "name": "Direto Enfermaria", "accommodation": "Enfermaria" },
								{ "id": 701, "name": "Direto Apartamento", "accommodation": "" }
							]
						}
					]
				}
			]
		})
	}

	/// Wrong shapes in every place the backend has been seen to send them
	pub fn malformed_quote() -> Value {
		json!({
			"id": 13,
			"slug": null,
			"selectedProductIds": "none",
			"lives0To18": "abc",
			"plans": [
				{
					"id": 1,
					"name": "Plano",
					"quoteType": "VIDA",
					"tables": { "unexpected": true }
				},
				{
					"id": 2,
					"name": "Outro",
					"tables": [ { "id": 3, "products": [ { "id": 4, "name": "P", "cities": "São Paulo" } ] } ]
				}
			]
		})
	}
}

/// Entity builders for tests
#[allow(dead_code)]
pub struct MockEntities;

#[allow(dead_code)]
impl MockEntities {
	pub fn health_product(id: &str, name: &str, price_0_to_18_cents: i64) -> Product {
		Product::new(id, name)
			.with_price(AgeBracket::From0To18, Money::from_cents(price_0_to_18_cents))
	}

	pub fn quote_with_tracks(health_products: Vec<Product>, odonto_products: Vec<Product>) -> Quote {
		let mut quote = Quote::new("1", "tracks");
		if !health_products.is_empty() {
			let table = health_products
				.into_iter()
				.fold(Table::new("th"), Table::with_product);
			quote = quote.with_plan(Plan::new("ph", "Saúde").with_table(table));
		}
		if !odonto_products.is_empty() {
			let table = odonto_products
				.into_iter()
				.fold(Table::new("to"), Table::with_product);
			quote = quote.with_plan(
				Plan::new("po", "Odonto")
					.with_type(QuoteType::Odonto)
					.with_table(table),
			);
		}
		quote
	}
}
