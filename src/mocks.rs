//! In-memory quote backend for demos, offline use and tests
//!
//! `FixtureQuoteApi` answers every API call from quotes loaded up front, so
//! the whole stack can run without a server.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use quotedesk_types::{
	AgeBracket, ApiError, ApiResult, City, EntityId, Money, NoteTab, PdfDocument, PdfOptions,
	Plan, Product, Quote, QuoteApi, QuoteListItem, QuoteType, Refnet, Table,
};

/// Base64 of a minimal `%PDF-1.4` header
const STUB_PDF_BASE64: &str = "JVBERi0xLjQK";

#[derive(Debug, Default)]
pub struct FixtureQuoteApi {
	quotes: DashMap<EntityId, Quote>,
	next_id: AtomicU64,
	/// Answer removals without a snapshot, forcing local reconciliation
	acknowledge_only: bool,
}

impl FixtureQuoteApi {
	pub fn new() -> Self {
		Self {
			next_id: AtomicU64::new(1_000),
			..Default::default()
		}
	}

	pub fn with_quote(self, quote: Quote) -> Self {
		self.quotes.insert(quote.id.clone(), quote);
		self
	}

	pub fn acknowledge_only(mut self) -> Self {
		self.acknowledge_only = true;
		self
	}

	pub fn quote(&self, quote_id: &EntityId) -> Option<Quote> {
		self.quotes.get(quote_id).map(|entry| entry.value().clone())
	}

	fn require(&self, quote_id: &EntityId) -> ApiResult<Quote> {
		self.quote(quote_id)
			.ok_or_else(|| ApiError::from_http_failure(404))
	}
}

#[async_trait]
impl QuoteApi for FixtureQuoteApi {
	async fn list_quotes(&self) -> ApiResult<Vec<QuoteListItem>> {
		let mut items: Vec<QuoteListItem> = self
			.quotes
			.iter()
			.map(|entry| {
				let quote = entry.value();
				QuoteListItem {
					id: quote.id.clone(),
					slug: quote.slug.clone(),
					client_name: quote.client_name.clone(),
					created_at: quote.created_at,
					plan_count: quote.plans.len() as u32,
				}
			})
			.collect();
		items.sort_by(|a, b| a.id.cmp(&b.id));
		Ok(items)
	}

	async fn fetch_quote(&self, quote_id: &EntityId) -> ApiResult<Quote> {
		self.require(quote_id)
	}

	async fn remove_products(
		&self,
		quote_id: &EntityId,
		product_ids: &[EntityId],
	) -> ApiResult<Option<Quote>> {
		let updated = self.require(quote_id)?.without_products(product_ids);
		self.quotes.insert(quote_id.clone(), updated.clone());
		Ok((!self.acknowledge_only).then_some(updated))
	}

	async fn rename_client(
		&self,
		quote_id: &EntityId,
		client_name: Option<String>,
	) -> ApiResult<()> {
		let mut entry = self
			.quotes
			.get_mut(quote_id)
			.ok_or_else(|| ApiError::from_http_failure(404))?;
		entry.client_name = client_name;
		Ok(())
	}

	async fn duplicate_quote(&self, quote_id: &EntityId) -> ApiResult<EntityId> {
		let mut copy = self.require(quote_id)?;
		let new_id = EntityId::from(self.next_id.fetch_add(1, Ordering::SeqCst));
		copy.id = new_id.clone();
		copy.slug = format!("{}-copia", copy.slug);
		self.quotes.insert(new_id.clone(), copy);
		Ok(new_id)
	}

	async fn delete_quote(&self, quote_id: &EntityId) -> ApiResult<()> {
		self.quotes
			.remove(quote_id)
			.map(|_| ())
			.ok_or_else(|| ApiError::from_http_failure(404))
	}

	async fn generate_pdf(
		&self,
		quote_id: &EntityId,
		_options: &PdfOptions,
	) -> ApiResult<PdfDocument> {
		let quote = self.require(quote_id)?;
		Ok(PdfDocument {
			content: STUB_PDF_BASE64.to_string(),
			file_name: Some(format!("cotacao-{}.pdf", quote.slug)),
		})
	}
}

/// A two-track quote with prices, service areas, networks and notes
pub fn sample_quote() -> Quote {
	let einstein = Refnet::new("r1", "Hospital Israelita Albert Einstein")
		.in_city("São Paulo")
		.with_expertise("Cardiologia")
		.with_expertise("Oncologia");
	let vera_cruz = Refnet::new("r2", "Hospital Vera Cruz")
		.in_city("Campinas")
		.with_expertise("Ortopedia");

	let health = Plan::new("p1", "Amil S380")
		.with_manager("Amil")
		.with_note(
			NoteTab::Discount,
			"<p>Desconto progressivo:</p><table><tr><th>Vidas</th><th>Desconto</th></tr>\
			<tr><td>2 a 29</td><td>5%</td></tr><tr><td>30+</td><td>10%</td></tr></table>",
		)
		.with_note(
			NoteTab::GracePeriod,
			"Car&ecirc;ncia de 30 dias para consultas.<br>Regras: https://amil.example.com/carencias",
		)
		.with_table(
			Table::new("t1")
				.with_product(
					Product::new("101", "S380 Enfermaria")
						.with_accommodation("Enfermaria")
						.with_price(AgeBracket::From0To18, Money::from_cents(21_450))
						.with_price(AgeBracket::From29To33, Money::from_cents(38_917))
						.with_city(City::named("São Paulo"))
						.with_city(City::named("Santo André"))
						.with_refnet(einstein.clone()),
				)
				.with_product(
					Product::new("102", "S380 Apartamento")
						.with_accommodation("Apartamento")
						.with_price(AgeBracket::From0To18, Money::from_cents(25_740))
						.with_price(AgeBracket::From29To33, Money::from_cents(46_700))
						.with_city(City::named("São Paulo"))
						.with_city(City::named("Campinas"))
						.with_refnet(einstein)
						.with_refnet(vera_cruz),
				),
		);

	let dental = Plan::new("p2", "OdontoPrev Integral")
		.with_manager("OdontoPrev")
		.with_type(QuoteType::Odonto)
		.with_note(NoteTab::Documentation, "RG, CPF e comprovante de residência")
		.with_table(
			Table::new("t2").with_product(
				Product::new("201", "Integral Doc")
					.with_price(AgeBracket::From0To18, Money::from_cents(3_990))
					.with_price(AgeBracket::From29To33, Money::from_cents(3_990))
					.with_city(City::named("São Paulo")),
			),
		);

	Quote::new("1", "familia-silva")
		.with_client_name("Família Silva")
		.with_lives(AgeBracket::From0To18, 2)
		.with_lives(AgeBracket::From29To33, 2)
		.with_plan(health)
		.with_plan(dental)
}
