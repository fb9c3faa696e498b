//! The ten fixed age brackets used for per-life pricing

use serde::{Deserialize, Serialize};

use super::lenient;
use crate::money::Money;

/// Age bracket, in the positional order shared by headcounts and prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBracket {
	From0To18,
	From19To23,
	From24To28,
	From29To33,
	From34To38,
	From39To43,
	From44To48,
	From49To53,
	From54To58,
	From59,
}

impl AgeBracket {
	pub const ALL: [AgeBracket; 10] = [
		AgeBracket::From0To18,
		AgeBracket::From19To23,
		AgeBracket::From24To28,
		AgeBracket::From29To33,
		AgeBracket::From34To38,
		AgeBracket::From39To43,
		AgeBracket::From44To48,
		AgeBracket::From49To53,
		AgeBracket::From54To58,
		AgeBracket::From59,
	];

	/// Display label used in pricing tables
	pub fn label(&self) -> &'static str {
		match self {
			Self::From0To18 => "0 a 18",
			Self::From19To23 => "19 a 23",
			Self::From24To28 => "24 a 28",
			Self::From29To33 => "29 a 33",
			Self::From34To38 => "34 a 38",
			Self::From39To43 => "39 a 43",
			Self::From44To48 => "44 a 48",
			Self::From49To53 => "49 a 53",
			Self::From54To58 => "54 a 58",
			Self::From59 => "59+",
		}
	}

	pub fn index(&self) -> usize {
		*self as usize
	}
}

/// Lives per age bracket on a quote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketCounts {
	#[serde(rename = "lives0To18", default, deserialize_with = "lenient::count")]
	pub from_0_to_18: u32,
	#[serde(rename = "lives19To23", default, deserialize_with = "lenient::count")]
	pub from_19_to_23: u32,
	#[serde(rename = "lives24To28", default, deserialize_with = "lenient::count")]
	pub from_24_to_28: u32,
	#[serde(rename = "lives29To33", default, deserialize_with = "lenient::count")]
	pub from_29_to_33: u32,
	#[serde(rename = "lives34To38", default, deserialize_with = "lenient::count")]
	pub from_34_to_38: u32,
	#[serde(rename = "lives39To43", default, deserialize_with = "lenient::count")]
	pub from_39_to_43: u32,
	#[serde(rename = "lives44To48", default, deserialize_with = "lenient::count")]
	pub from_44_to_48: u32,
	#[serde(rename = "lives49To53", default, deserialize_with = "lenient::count")]
	pub from_49_to_53: u32,
	#[serde(rename = "lives54To58", default, deserialize_with = "lenient::count")]
	pub from_54_to_58: u32,
	#[serde(rename = "lives59Plus", default, deserialize_with = "lenient::count")]
	pub from_59: u32,
}

impl BracketCounts {
	pub fn get(&self, bracket: AgeBracket) -> u32 {
		match bracket {
			AgeBracket::From0To18 => self.from_0_to_18,
			AgeBracket::From19To23 => self.from_19_to_23,
			AgeBracket::From24To28 => self.from_24_to_28,
			AgeBracket::From29To33 => self.from_29_to_33,
			AgeBracket::From34To38 => self.from_34_to_38,
			AgeBracket::From39To43 => self.from_39_to_43,
			AgeBracket::From44To48 => self.from_44_to_48,
			AgeBracket::From49To53 => self.from_49_to_53,
			AgeBracket::From54To58 => self.from_54_to_58,
			AgeBracket::From59 => self.from_59,
		}
	}

	pub fn set(&mut self, bracket: AgeBracket, lives: u32) {
		let slot = match bracket {
			AgeBracket::From0To18 => &mut self.from_0_to_18,
			AgeBracket::From19To23 => &mut self.from_19_to_23,
			AgeBracket::From24To28 => &mut self.from_24_to_28,
			AgeBracket::From29To33 => &mut self.from_29_to_33,
			AgeBracket::From34To38 => &mut self.from_34_to_38,
			AgeBracket::From39To43 => &mut self.from_39_to_43,
			AgeBracket::From44To48 => &mut self.from_44_to_48,
			AgeBracket::From49To53 => &mut self.from_49_to_53,
			AgeBracket::From54To58 => &mut self.from_54_to_58,
			AgeBracket::From59 => &mut self.from_59,
		};
		*slot = lives;
	}

	pub fn with(mut self, bracket: AgeBracket, lives: u32) -> Self {
		self.set(bracket, lives);
		self
	}

	/// Total lives across all brackets
	pub fn total(&self) -> u32 {
		AgeBracket::ALL
			.iter()
			.map(|b| self.get(*b))
			.fold(0u32, |acc, n| acc.saturating_add(n))
	}
}

/// Per-life price per age bracket on a product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketPrices {
	#[serde(rename = "price0To18", default, deserialize_with = "lenient::opt_money")]
	pub from_0_to_18: Option<Money>,
	#[serde(rename = "price19To23", default, deserialize_with = "lenient::opt_money")]
	pub from_19_to_23: Option<Money>,
	#[serde(rename = "price24To28", default, deserialize_with = "lenient::opt_money")]
	pub from_24_to_28: Option<Money>,
	#[serde(rename = "price29To33", default, deserialize_with = "lenient::opt_money")]
	pub from_29_to_33: Option<Money>,
	#[serde(rename = "price34To38", default, deserialize_with = "lenient::opt_money")]
	pub from_34_to_38: Option<Money>,
	#[serde(rename = "price39To43", default, deserialize_with = "lenient::opt_money")]
	pub from_39_to_43: Option<Money>,
	#[serde(rename = "price44To48", default, deserialize_with = "lenient::opt_money")]
	pub from_44_to_48: Option<Money>,
	#[serde(rename = "price49To53", default, deserialize_with = "lenient::opt_money")]
	pub from_49_to_53: Option<Money>,
	#[serde(rename = "price54To58", default, deserialize_with = "lenient::opt_money")]
	pub from_54_to_58: Option<Money>,
	#[serde(rename = "price59Plus", default, deserialize_with = "lenient::opt_money")]
	pub from_59: Option<Money>,
}

impl BracketPrices {
	pub fn get(&self, bracket: AgeBracket) -> Option<Money> {
		match bracket {
			AgeBracket::From0To18 => self.from_0_to_18,
			AgeBracket::From19To23 => self.from_19_to_23,
			AgeBracket::From24To28 => self.from_24_to_28,
			AgeBracket::From29To33 => self.from_29_to_33,
			AgeBracket::From34To38 => self.from_34_to_38,
			AgeBracket::From39To43 => self.from_39_to_43,
			AgeBracket::From44To48 => self.from_44_to_48,
			AgeBracket::From49To53 => self.from_49_to_53,
			AgeBracket::From54To58 => self.from_54_to_58,
			AgeBracket::From59 => self.from_59,
		}
	}

	pub fn set(&mut self, bracket: AgeBracket, price: Option<Money>) {
		let slot = match bracket {
			AgeBracket::From0To18 => &mut self.from_0_to_18,
			AgeBracket::From19To23 => &mut self.from_19_to_23,
			AgeBracket::From24To28 => &mut self.from_24_to_28,
			AgeBracket::From29To33 => &mut self.from_29_to_33,
			AgeBracket::From34To38 => &mut self.from_34_to_38,
			AgeBracket::From39To43 => &mut self.from_39_to_43,
			AgeBracket::From44To48 => &mut self.from_44_to_48,
			AgeBracket::From49To53 => &mut self.from_49_to_53,
			AgeBracket::From54To58 => &mut self.from_54_to_58,
			AgeBracket::From59 => &mut self.from_59,
		};
		*slot = price;
	}

	pub fn with(mut self, bracket: AgeBracket, price: Money) -> Self {
		self.set(bracket, Some(price));
		self
	}

	pub fn is_empty(&self) -> bool {
		AgeBracket::ALL.iter().all(|b| self.get(*b).is_none())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_bracket_order_matches_index() {
		for (i, bracket) in AgeBracket::ALL.iter().enumerate() {
			assert_eq!(bracket.index(), i);
		}
		assert_eq!(AgeBracket::From0To18.label(), "0 a 18");
		assert_eq!(AgeBracket::From59.label(), "59+");
	}

	#[test]
	fn test_counts_deserialize_by_bracket_key() {
		let counts: BracketCounts =
			serde_json::from_value(json!({ "lives0To18": 2, "lives59Plus": "1" })).unwrap();
		assert_eq!(counts.get(AgeBracket::From0To18), 2);
		assert_eq!(counts.get(AgeBracket::From59), 1);
		assert_eq!(counts.get(AgeBracket::From29To33), 0);
		assert_eq!(counts.total(), 3);
	}

	#[test]
	fn test_prices_treat_null_as_absent() {
		let prices: BracketPrices =
			serde_json::from_value(json!({ "price0To18": 100.0, "price19To23": null })).unwrap();
		assert_eq!(
			prices.get(AgeBracket::From0To18),
			Some(Money::from_cents(10_000))
		);
		assert_eq!(prices.get(AgeBracket::From19To23), None);
		assert!(!prices.is_empty());
		assert!(BracketPrices::default().is_empty());
	}
}
