//! View state of one open quote
//!
//! Holds the current snapshot together with the screen-local choices made on
//! it. The snapshot is only ever replaced as a whole; every derived view is
//! recomputed from it on demand.

use quotedesk_types::{EntityId, NoteTab, Quote, QuoteType};
use tracing::debug;

use crate::notes::{self, NoteEntry};
use crate::pricing::{price_breakdown, PriceBreakdown};
use crate::refnet::{refnet_entries, RefnetEntry};
use crate::sales_area::SalesAreaMatrix;
use crate::selection::{
	selected_products, tracks_with_products, FeaturedCursor, SelectedProduct, SelectionSet,
};
use crate::share::build_share_message;
use crate::type_partition::{available_types, resolve_active_type};

#[derive(Debug, Clone)]
pub struct QuoteSession {
	quote: Quote,
	selection: SelectionSet,
	active_type: QuoteType,
	cursor: FeaturedCursor,
}

impl QuoteSession {
	/// Open a snapshot on its first track, with the selection saved on the quote
	pub fn new(quote: Quote) -> Self {
		let selection = SelectionSet::from_quote(&quote);
		let active_type = resolve_active_type(&available_types(&quote), None);
		let mut session = Self {
			quote,
			selection,
			active_type,
			cursor: FeaturedCursor::default(),
		};
		session.refresh_cursor();
		session
	}

	pub fn quote(&self) -> &Quote {
		&self.quote
	}

	pub fn quote_id(&self) -> &EntityId {
		&self.quote.id
	}

	pub fn selection(&self) -> &SelectionSet {
		&self.selection
	}

	pub fn active_type(&self) -> QuoteType {
		self.active_type
	}

	pub fn cursor(&self) -> FeaturedCursor {
		self.cursor
	}

	pub fn available_types(&self) -> Vec<QuoteType> {
		available_types(&self.quote)
	}

	/// Switch track, falling back to the first available one; the featured
	/// product goes back to the first
	pub fn set_active_type(&mut self, requested: QuoteType) -> QuoteType {
		self.active_type = resolve_active_type(&self.available_types(), Some(requested));
		self.cursor.reset();
		self.refresh_cursor();
		debug!(
			"Quote {} switched to track {}",
			self.quote.id,
			self.active_type.as_str()
		);
		self.active_type
	}

	pub fn set_selection(&mut self, selection: SelectionSet) {
		self.selection = selection;
		self.cursor.reset();
		self.refresh_cursor();
	}

	/// Returns whether the product is now explicitly selected
	pub fn toggle_product(&mut self, product_id: EntityId) -> bool {
		let selected = self.selection.toggle(product_id);
		self.cursor.reset();
		self.refresh_cursor();
		selected
	}

	/// Adopt a new snapshot from the backend
	///
	/// The track is kept when still available, selected ids that no longer
	/// exist are dropped and the cursor is clamped to the new product list.
	pub fn replace_snapshot(&mut self, quote: Quote) {
		self.quote = quote;
		self.selection.retain_existing(&self.quote);
		self.active_type = resolve_active_type(&self.available_types(), Some(self.active_type));
		self.refresh_cursor();
	}

	/// Drop products from the current snapshot without a backend round-trip
	pub fn remove_products_locally(&mut self, product_ids: &[EntityId]) {
		let next = self.quote.without_products(product_ids);
		self.replace_snapshot(next);
	}

	/// Products of the active track that pass the selection
	pub fn products(&self) -> Vec<SelectedProduct<'_>> {
		selected_products(&self.quote, self.active_type, &self.selection)
	}

	/// The featured product, or `None` for the empty state
	pub fn featured(&self) -> Option<SelectedProduct<'_>> {
		self.cursor.pick(&self.products()).copied()
	}

	pub fn featured_pricing(&self) -> Option<PriceBreakdown> {
		self.featured()
			.map(|selected| price_breakdown(&self.quote.headcounts, selected.product))
	}

	pub fn next_product(&mut self) -> usize {
		self.cursor.next()
	}

	pub fn previous_product(&mut self) -> usize {
		self.cursor.previous()
	}

	pub fn go_to_product(&mut self, index: usize) -> usize {
		self.cursor.go_to(index);
		self.cursor.index()
	}

	/// The track switch only makes sense when more than one track has products
	pub fn type_switch_visible(&self) -> bool {
		tracks_with_products(&self.quote, &self.selection).len() > 1
	}

	pub fn notes(&self, tab: NoteTab) -> Vec<NoteEntry<'_>> {
		notes::notes_for_tab(&self.quote, self.active_type, tab)
	}

	pub fn note_tabs(&self) -> Vec<NoteTab> {
		notes::tabs_with_content(&self.quote, self.active_type)
	}

	pub fn sales_area(&self) -> SalesAreaMatrix<'_> {
		SalesAreaMatrix::build(&self.products())
	}

	pub fn refnets(&self) -> Vec<RefnetEntry<'_>> {
		refnet_entries(&self.products())
	}

	pub fn summary_text(&self, share_base_url: &str) -> String {
		build_share_message(&self.quote, &self.selection, share_base_url)
	}

	fn refresh_cursor(&mut self) {
		let len = self.products().len();
		self.cursor.set_len(len);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use quotedesk_types::{AgeBracket, Money, Plan, Product, Table};

	fn two_track_quote() -> Quote {
		Quote::new("7", "duas-trilhas")
			.with_lives(AgeBracket::From0To18, 2)
			.with_plan(
				Plan::new("h", "Saúde").with_table(
					Table::new("t1")
						.with_product(
							Product::new("h1", "Enfermaria")
								.with_price(AgeBracket::From0To18, Money::from_cents(10_000)),
						)
						.with_product(
							Product::new("h2", "Apartamento")
								.with_price(AgeBracket::From0To18, Money::from_cents(15_000)),
						),
				),
			)
			.with_plan(
				Plan::new("o", "Odonto")
					.with_type(QuoteType::Odonto)
					.with_table(Table::new("t2").with_product(Product::new("o1", "Dental"))),
			)
	}

	#[test]
	fn test_defaults_to_health_and_prices_featured() {
		let session = QuoteSession::new(two_track_quote());
		assert_eq!(session.active_type(), QuoteType::Health);
		assert!(session.type_switch_visible());

		let featured = session.featured().unwrap();
		assert_eq!(featured.product.name, "Enfermaria");

		let pricing = session.featured_pricing().unwrap();
		assert_eq!(pricing.rows.len(), 1);
		assert_eq!(pricing.rows[0].label(), "0 a 18");
		assert_eq!(pricing.rows[0].headcount, 2);
		assert_eq!(pricing.rows[0].subtotal.to_brl(), "R$ 200,00");
		assert_eq!(pricing.total.to_brl(), "R$ 200,00");
	}

	#[test]
	fn test_switching_track_resets_cursor() {
		let mut session = QuoteSession::new(two_track_quote());
		assert_eq!(session.next_product(), 1);

		assert_eq!(session.set_active_type(QuoteType::Odonto), QuoteType::Odonto);
		assert_eq!(session.cursor().index(), 0);
		assert_eq!(session.featured().unwrap().product.name, "Dental");
		assert!(session.featured_pricing().unwrap().is_empty());
	}

	#[test]
	fn test_unavailable_track_falls_back() {
		let quote = Quote::new("1", "q").with_plan(
			Plan::new("o", "Odonto")
				.with_type(QuoteType::Odonto)
				.with_table(Table::new("t").with_product(Product::new("o1", "Dental"))),
		);
		let mut session = QuoteSession::new(quote);
		assert_eq!(session.active_type(), QuoteType::Odonto);
		assert_eq!(session.set_active_type(QuoteType::Health), QuoteType::Odonto);
		assert!(!session.type_switch_visible());
	}

	#[test]
	fn test_removing_last_product_shows_empty_state() {
		let mut session = QuoteSession::new(two_track_quote());
		session.set_active_type(QuoteType::Odonto);

		session.remove_products_locally(&[EntityId::from("o1")]);
		assert_eq!(session.active_type(), QuoteType::Odonto);
		assert!(session.featured().is_none());
		assert!(session.featured_pricing().is_none());
		assert!(!session.type_switch_visible());
		assert_eq!(session.quote().product_count(), 2);
	}

	#[test]
	fn test_removing_only_selected_product_shows_empty_state() {
		let quote = Quote::new("8", "uma-selecao").with_selected([EntityId::from("h1")]).with_plan(
			Plan::new("h", "Saúde").with_table(
				Table::new("t")
					.with_product(Product::new("h1", "Selecionado"))
					.with_product(Product::new("h2", "Nao selecionado")),
			),
		);
		let mut session = QuoteSession::new(quote);
		assert_eq!(session.products().len(), 1);

		session.remove_products_locally(&[EntityId::from("h1")]);
		assert!(session.featured().is_none());
		assert!(session.products().is_empty());
		assert!(!session.selection().is_all());
		assert!(!session.type_switch_visible());
		assert_eq!(session.quote().product_count(), 1);

		// A fresh session on the reconciled snapshot agrees
		let reopened = QuoteSession::new(session.quote().clone());
		assert!(reopened.featured().is_none());
	}

	#[test]
	fn test_backend_snapshot_keeps_exhausted_selection() {
		let mut session = QuoteSession::new(two_track_quote().with_selected([EntityId::from("h2")]));
		let mut from_backend = two_track_quote().without_products(&[EntityId::from("h2")]);
		from_backend.selection_exhausted = false;

		session.replace_snapshot(from_backend);
		assert!(session.selection().is_empty());
		assert!(session.featured().is_none());
	}

	#[test]
	fn test_selection_changes_reset_cursor() {
		let mut session = QuoteSession::new(two_track_quote());
		session.go_to_product(1);
		assert_eq!(session.featured().unwrap().product.name, "Apartamento");

		assert!(session.toggle_product(EntityId::from("h2")));
		assert_eq!(session.cursor().index(), 0);
		assert_eq!(session.products().len(), 1);
		assert_eq!(session.featured().unwrap().product.name, "Apartamento");
		assert!(!session.type_switch_visible());

		session.set_selection(SelectionSet::all());
		assert_eq!(session.products().len(), 2);
		assert!(session.type_switch_visible());
	}

	#[test]
	fn test_replace_snapshot_clamps_cursor_and_prunes_selection() {
		let mut session = QuoteSession::new(two_track_quote());
		session.go_to_product(1);
		session.set_selection(SelectionSet::from_ids(["h1", "h2"].map(EntityId::from)));
		session.go_to_product(1);

		session.replace_snapshot(two_track_quote().without_products(&[EntityId::from("h2")]));
		assert_eq!(session.selection().ids(), &[EntityId::from("h1")]);
		assert_eq!(session.cursor().index(), 0);
		assert_eq!(session.featured().unwrap().product.name, "Enfermaria");
	}

	#[test]
	fn test_selection_is_read_from_quote() {
		let quote = two_track_quote().with_selected([EntityId::from("h2")]);
		let session = QuoteSession::new(quote);
		assert_eq!(session.products().len(), 1);
		assert_eq!(session.featured().unwrap().product.name, "Apartamento");
	}

	#[test]
	fn test_summary_uses_session_selection() {
		let mut session = QuoteSession::new(two_track_quote());
		session.toggle_product(EntityId::from("o1"));
		let text = session.summary_text("https://s.example/c/");
		assert!(text.contains("Dental"));
		assert!(!text.contains("Enfermaria"));
		assert!(text.contains("https://s.example/c/duas-trilhas"));
	}
}
