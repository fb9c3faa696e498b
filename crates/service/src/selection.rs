//! Product selection within a track and the featured-product cursor

use quotedesk_types::{EntityId, Plan, Product, Quote, QuoteType, Table};
use tracing::debug;

/// Products chosen for comparison
///
/// A set that was never given ids selects every product. Once ids have been
/// chosen the set stays explicit: pruning or toggling away the last id selects
/// nothing rather than falling back to everything. Ids keep insertion order
/// and are never duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
	ids: Vec<EntityId>,
	explicit: bool,
}

impl SelectionSet {
	/// Selection that keeps every product
	pub fn all() -> Self {
		Self::default()
	}

	/// Explicit selection with no products in it
	pub fn none() -> Self {
		Self {
			ids: Vec::new(),
			explicit: true,
		}
	}

	/// Explicit when at least one id is given, otherwise the same as [`SelectionSet::all`]
	pub fn from_ids(ids: impl IntoIterator<Item = EntityId>) -> Self {
		let mut set = Self::default();
		for id in ids {
			set.insert(id);
		}
		set
	}

	/// Selection stored on the quote itself
	pub fn from_quote(quote: &Quote) -> Self {
		if quote.selection_exhausted && quote.selected_product_ids.is_empty() {
			return Self::none();
		}
		Self::from_ids(quote.selected_product_ids.iter().cloned())
	}

	pub fn is_all(&self) -> bool {
		!self.explicit
	}

	/// Explicit selection whose ids were all dropped
	pub fn is_empty(&self) -> bool {
		self.explicit && self.ids.is_empty()
	}

	pub fn ids(&self) -> &[EntityId] {
		&self.ids
	}

	pub fn contains(&self, product_id: &EntityId) -> bool {
		self.is_all() || self.ids.contains(product_id)
	}

	/// Returns false when the id was already present
	pub fn insert(&mut self, product_id: EntityId) -> bool {
		self.explicit = true;
		if self.ids.contains(&product_id) {
			return false;
		}
		self.ids.push(product_id);
		true
	}

	pub fn remove(&mut self, product_id: &EntityId) -> bool {
		let before = self.ids.len();
		self.ids.retain(|id| id != product_id);
		before != self.ids.len()
	}

	/// Flip membership of one product; returns whether it is now explicitly listed
	pub fn toggle(&mut self, product_id: EntityId) -> bool {
		if self.remove(&product_id) {
			false
		} else {
			self.insert(product_id)
		}
	}

	/// Drop ids that no longer exist in the snapshot
	pub fn retain_existing(&mut self, quote: &Quote) {
		self.ids
			.retain(|id| quote.find_product(id).is_some());
		if self.is_empty() {
			debug!("Quote {}: every selected product is gone", quote.id);
		}
	}
}

/// A surviving product with the plan and table it belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedProduct<'a> {
	pub plan: &'a Plan,
	pub table: &'a Table,
	pub product: &'a Product,
}

/// Flatten the products of one track that pass the selection, in plan, table
/// and product order
pub fn selected_products<'a>(
	quote: &'a Quote,
	track: QuoteType,
	selection: &SelectionSet,
) -> Vec<SelectedProduct<'a>> {
	let products: Vec<SelectedProduct<'a>> = quote
		.plans_of_type(track)
		.flat_map(|plan| {
			plan.products()
				.map(move |(table, product)| SelectedProduct {
					plan,
					table,
					product,
				})
		})
		.filter(|selected| selection.contains(&selected.product.id))
		.collect();

	debug!(
		"Quote {} track {}: {} product(s) survive selection",
		quote.id,
		track.as_str(),
		products.len()
	);
	products
}

/// Tracks that have at least one surviving product
pub fn tracks_with_products(quote: &Quote, selection: &SelectionSet) -> Vec<QuoteType> {
	crate::type_partition::available_types(quote)
		.into_iter()
		.filter(|track| !selected_products(quote, *track, selection).is_empty())
		.collect()
}

/// Index of the featured product in a flattened product list
///
/// Always within `[0, len - 1]`, and 0 for an empty list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeaturedCursor {
	index: usize,
	len: usize,
}

impl FeaturedCursor {
	pub fn new(len: usize) -> Self {
		Self { index: 0, len }
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn reset(&mut self) {
		self.index = 0;
	}

	/// Adopt a new list length, keeping the index in range
	pub fn set_len(&mut self, len: usize) {
		self.len = len;
		self.index = self.index.min(len.saturating_sub(1));
	}

	pub fn go_to(&mut self, index: usize) {
		self.index = index.min(self.len.saturating_sub(1));
	}

	/// Step forward; stays on the last product
	pub fn next(&mut self) -> usize {
		self.go_to(self.index.saturating_add(1));
		self.index
	}

	/// Step back; stays on the first product
	pub fn previous(&mut self) -> usize {
		self.index = self.index.saturating_sub(1);
		self.index
	}

	pub fn has_next(&self) -> bool {
		self.index + 1 < self.len
	}

	pub fn has_previous(&self) -> bool {
		self.index > 0
	}

	/// Pick the featured item out of a list of the tracked length
	pub fn pick<'s, T>(&self, items: &'s [T]) -> Option<&'s T> {
		items.get(self.index)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use quotedesk_types::Table;

	fn quote() -> Quote {
		Quote::new("1", "q")
			.with_plan(
				Plan::new("p1", "Saúde A")
					.with_table(
						Table::new("t1")
							.with_product(Product::new("a", "A"))
							.with_product(Product::new("b", "B")),
					)
					.with_table(Table::new("t2").with_product(Product::new("c", "C"))),
			)
			.with_plan(
				Plan::new("p2", "Odonto")
					.with_type(QuoteType::Odonto)
					.with_table(Table::new("t3").with_product(Product::new("d", "D"))),
			)
			.with_plan(
				Plan::new("p3", "Saúde B")
					.with_table(Table::new("t4").with_product(Product::new("e", "E"))),
			)
	}

	fn names(products: &[SelectedProduct<'_>]) -> Vec<String> {
		products.iter().map(|p| p.product.name.clone()).collect()
	}

	#[test]
	fn test_empty_selection_keeps_whole_track() {
		let quote = quote();
		let health = selected_products(&quote, QuoteType::Health, &SelectionSet::all());
		assert_eq!(names(&health), vec!["A", "B", "C", "E"]);
		assert_eq!(health[2].table.id.as_str(), "t2");
		assert_eq!(health[3].plan.name, "Saúde B");

		let odonto = selected_products(&quote, QuoteType::Odonto, &SelectionSet::all());
		assert_eq!(names(&odonto), vec!["D"]);
	}

	#[test]
	fn test_empty_selection_count_matches_track_total() {
		let quote = quote();
		for track in QuoteType::ALL {
			let total: usize = quote
				.plans_of_type(track)
				.map(|plan| plan.products().count())
				.sum();
			assert_eq!(
				selected_products(&quote, track, &SelectionSet::all()).len(),
				total
			);
		}
	}

	#[test]
	fn test_selection_is_intersection() {
		let quote = quote();
		let selection = SelectionSet::from_ids(["e", "a", "d", "zzz"].map(EntityId::from));

		let health = selected_products(&quote, QuoteType::Health, &selection);
		assert_eq!(names(&health), vec!["A", "E"]);

		let odonto = selected_products(&quote, QuoteType::Odonto, &selection);
		assert_eq!(names(&odonto), vec!["D"]);
	}

	#[test]
	fn test_selection_from_other_track_empties_this_one() {
		let quote = quote();
		let selection = SelectionSet::from_ids([EntityId::from("d")]);
		assert!(selected_products(&quote, QuoteType::Health, &selection).is_empty());
		assert_eq!(
			tracks_with_products(&quote, &selection),
			vec![QuoteType::Odonto]
		);
	}

	#[test]
	fn test_selection_set_semantics() {
		let mut set = SelectionSet::from_ids(["a", "a", "b"].map(EntityId::from));
		assert_eq!(set.ids().len(), 2);
		assert!(!set.contains(&EntityId::from("c")));

		assert!(!set.toggle(EntityId::from("a")));
		assert!(set.toggle(EntityId::from("c")));
		assert_eq!(
			set.ids(),
			&[EntityId::from("b"), EntityId::from("c")]
		);

		set.retain_existing(&Quote::new("1", "q"));
		assert!(!set.is_all());
		assert!(set.is_empty());
		assert!(!set.contains(&EntityId::from("b")));
		assert!(!set.contains(&EntityId::from("anything")));
	}

	#[test]
	fn test_toggling_away_last_id_selects_nothing() {
		let mut set = SelectionSet::all();
		assert!(set.toggle(EntityId::from("a")));
		assert!(!set.toggle(EntityId::from("a")));
		assert!(set.is_empty());
		assert!(selected_products(&quote(), QuoteType::Health, &set).is_empty());

		assert!(SelectionSet::from_ids(Vec::<EntityId>::new()).is_all());
	}

	#[test]
	fn test_exhausted_quote_selection_selects_nothing() {
		let quote = quote()
			.with_selected([EntityId::from("a")])
			.without_products(&[EntityId::from("a")]);
		assert!(quote.selected_product_ids.is_empty());
		assert!(SelectionSet::from_quote(&quote).is_empty());
		assert!(SelectionSet::from_quote(&Quote::new("2", "q")).is_all());
	}

	#[test]
	fn test_cursor_clamps() {
		let mut cursor = FeaturedCursor::new(3);
		assert_eq!(cursor.previous(), 0);
		assert_eq!(cursor.next(), 1);
		assert_eq!(cursor.next(), 2);
		assert_eq!(cursor.next(), 2);
		assert!(!cursor.has_next());
		assert!(cursor.has_previous());

		cursor.go_to(10);
		assert_eq!(cursor.index(), 2);

		cursor.set_len(2);
		assert_eq!(cursor.index(), 1);

		cursor.set_len(0);
		assert_eq!(cursor.index(), 0);
		assert_eq!(cursor.next(), 0);
		assert!(cursor.pick::<u8>(&[]).is_none());

		cursor.set_len(4);
		cursor.go_to(3);
		cursor.reset();
		assert_eq!(cursor.index(), 0);
	}
}
