//! Health / Dental plan discriminator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::QuoteValidationError;

/// Partition of plans into independent pricing tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuoteType {
	Health,
	Odonto,
}

impl QuoteType {
	pub const ALL: [QuoteType; 2] = [QuoteType::Health, QuoteType::Odonto];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Health => "HEALTH",
			Self::Odonto => "ODONTO",
		}
	}

	/// Short label shown on the track switcher
	pub fn label(&self) -> &'static str {
		match self {
			Self::Health => "Saúde",
			Self::Odonto => "Odonto",
		}
	}

	/// Section title used in shared summaries
	pub fn section_title(&self) -> &'static str {
		match self {
			Self::Health => "Planos de Saúde",
			Self::Odonto => "Planos Odontológicos",
		}
	}
}

impl Default for QuoteType {
	fn default() -> Self {
		Self::Health
	}
}

impl fmt::Display for QuoteType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for QuoteType {
	type Err = QuoteValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"HEALTH" => Ok(Self::Health),
			"ODONTO" => Ok(Self::Odonto),
			other => Err(QuoteValidationError::UnknownQuoteType {
				value: other.to_string(),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_is_case_insensitive() {
		assert_eq!("health".parse::<QuoteType>().unwrap(), QuoteType::Health);
		assert_eq!(" ODONTO ".parse::<QuoteType>().unwrap(), QuoteType::Odonto);
		assert!("VISION".parse::<QuoteType>().is_err());
	}

	#[test]
	fn test_serde_uses_uppercase_names() {
		let json = serde_json::to_string(&QuoteType::Odonto).unwrap();
		assert_eq!(json, "\"ODONTO\"");
	}
}
