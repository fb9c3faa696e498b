//! Exact monetary amounts in Brazilian reais

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Amount in centavos
///
/// Prices arrive from the backend as decimal numbers; they are rounded to two
/// decimals once at the deserialization boundary and all further arithmetic
/// is done on integers so totals match what the broker bills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
	pub const ZERO: Money = Money(0);

	pub fn from_cents(cents: i64) -> Self {
		Self(cents)
	}

	/// Convert a decimal amount in reais, rounding half away from zero
	pub fn from_decimal(value: f64) -> Option<Self> {
		if !value.is_finite() {
			return None;
		}
		let cents = (value * 100.0).round();
		if cents.abs() > i64::MAX as f64 {
			return None;
		}
		Some(Self(cents as i64))
	}

	/// Parse amounts written as `100.50`, `100,50`, `1.234,56` or `R$ 1.234,56`
	pub fn parse(input: &str) -> Option<Self> {
		let cleaned: String = input
			.trim()
			.trim_start_matches("R$")
			.chars()
			.filter(|c| !c.is_whitespace())
			.collect();
		if cleaned.is_empty() {
			return None;
		}

		let normalized = if cleaned.contains(',') {
			cleaned.replace('.', "").replace(',', ".")
		} else {
			cleaned
		};

		normalized
			.parse::<f64>()
			.ok()
			.and_then(Self::from_decimal)
	}

	pub fn cents(&self) -> i64 {
		self.0
	}

	pub fn as_decimal(&self) -> f64 {
		self.0 as f64 / 100.0
	}

	/// Multiply by a headcount
	pub fn times(&self, quantity: u32) -> Money {
		Money(self.0.saturating_mul(i64::from(quantity)))
	}

	/// Format with pt-BR conventions: `R$ 1.234,56`
	pub fn to_brl(&self) -> String {
		let sign = if self.0 < 0 { "-" } else { "" };
		let abs = self.0.unsigned_abs();
		let reais = abs / 100;
		let centavos = abs % 100;
		format!("{}R$ {},{:02}", sign, group_thousands(reais), centavos)
	}
}

fn group_thousands(value: u64) -> String {
	let digits = value.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push('.');
		}
		grouped.push(ch);
	}
	grouped
}

impl Add for Money {
	type Output = Money;

	fn add(self, rhs: Money) -> Money {
		Money(self.0.saturating_add(rhs.0))
	}
}

impl Sum for Money {
	fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
		iter.fold(Money::ZERO, |acc, m| acc + m)
	}
}

impl fmt::Display for Money {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_brl())
	}
}

impl Serialize for Money {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_f64(self.as_decimal())
	}
}
