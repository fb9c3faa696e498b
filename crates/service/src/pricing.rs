//! Per-age-bracket pricing of a product for the quote's headcounts

use quotedesk_types::{AgeBracket, BracketCounts, Money, Product};

/// One emitted bracket: lives in the bracket times the unit price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
	pub bracket: AgeBracket,
	pub headcount: u32,
	pub unit_price: Money,
	pub subtotal: Money,
}

impl PriceRow {
	pub fn label(&self) -> &'static str {
		self.bracket.label()
	}
}

/// Pricing table of the featured product
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceBreakdown {
	pub rows: Vec<PriceRow>,
	pub total: Money,
}

impl PriceBreakdown {
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn lives(&self) -> u32 {
		self.rows.iter().map(|row| row.headcount).sum()
	}

	/// Plain-text rendering, one line per bracket plus the total
	pub fn render(&self) -> String {
		let mut out = String::new();
		for row in &self.rows {
			out.push_str(&format!(
				"{:<8} {:>3} x {:>12} = {:>12}\n",
				row.label(),
				row.headcount,
				row.unit_price.to_brl(),
				row.subtotal.to_brl()
			));
		}
		out.push_str(&format!("Total: {}", self.total.to_brl()));
		out
	}
}

/// Zip headcounts with prices in bracket order
///
/// Brackets with no lives or no price are skipped. The total is the exact sum
/// of the emitted subtotals.
pub fn price_breakdown(headcounts: &BracketCounts, product: &Product) -> PriceBreakdown {
	let rows: Vec<PriceRow> = AgeBracket::ALL
		.iter()
		.filter_map(|&bracket| {
			let headcount = headcounts.get(bracket);
			if headcount == 0 {
				return None;
			}
			let unit_price = product.prices.get(bracket)?;
			Some(PriceRow {
				bracket,
				headcount,
				unit_price,
				subtotal: unit_price.times(headcount),
			})
		})
		.collect();

	let total = rows.iter().map(|row| row.subtotal).sum();
	PriceBreakdown { rows, total }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_single_bracket() {
		let counts = BracketCounts::default().with(AgeBracket::From0To18, 2);
		let product =
			Product::new("1", "Enfermaria").with_price(AgeBracket::From0To18, Money::from_cents(10_000));

		let breakdown = price_breakdown(&counts, &product);
		assert_eq!(breakdown.rows.len(), 1);
		assert_eq!(breakdown.rows[0].label(), "0 a 18");
		assert_eq!(breakdown.rows[0].subtotal.to_brl(), "R$ 200,00");
		assert_eq!(breakdown.total.to_brl(), "R$ 200,00");
	}

	#[test]
	fn test_skips_zero_headcount_and_missing_price() {
		let counts = BracketCounts::default()
			.with(AgeBracket::From0To18, 1)
			.with(AgeBracket::From24To28, 3)
			.with(AgeBracket::From59, 2);
		let product = Product::new("1", "Apartamento")
			.with_price(AgeBracket::From0To18, Money::from_cents(15_050))
			.with_price(AgeBracket::From19To23, Money::from_cents(99_999))
			.with_price(AgeBracket::From59, Money::from_cents(123_456));

		let breakdown = price_breakdown(&counts, &product);
		let brackets: Vec<AgeBracket> = breakdown.rows.iter().map(|r| r.bracket).collect();
		assert_eq!(brackets, vec![AgeBracket::From0To18, AgeBracket::From59]);
		assert!(breakdown
			.rows
			.iter()
			.all(|row| row.headcount > 0 && row.subtotal == row.unit_price.times(row.headcount)));

		let expected: i64 = breakdown
			.rows
			.iter()
			.map(|row| row.unit_price.cents() * row.headcount as i64)
			.sum();
		assert_eq!(breakdown.total.cents(), expected);
		assert_eq!(breakdown.total.to_brl(), "R$ 2.619,62");
		assert_eq!(breakdown.lives(), 3);
	}

	#[test]
	fn test_no_prices_is_empty() {
		let counts = BracketCounts::default().with(AgeBracket::From0To18, 2);
		let breakdown = price_breakdown(&counts, &Product::new("1", "Dental"));
		assert!(breakdown.is_empty());
		assert_eq!(breakdown.total, Money::ZERO);
		assert_eq!(breakdown.render(), "Total: R$ 0,00");
	}

	#[test]
	fn test_cents_do_not_drift() {
		let mut counts = BracketCounts::default();
		let mut product = Product::new("1", "P");
		for bracket in AgeBracket::ALL {
			counts.set(bracket, 3);
			product.prices.set(bracket, Some(Money::from_cents(3_333)));
		}
		let breakdown = price_breakdown(&counts, &product);
		assert_eq!(breakdown.rows.len(), 10);
		assert_eq!(breakdown.total.cents(), 3_333 * 3 * 10);
	}
}
