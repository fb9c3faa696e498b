//! Accent- and case-insensitive text matching

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical search form: NFD decomposition, combining marks dropped, lowercase
pub fn fold(input: &str) -> String {
	input
		.nfd()
		.filter(|c| !is_combining_mark(*c))
		.collect::<String>()
		.to_lowercase()
}

/// Pre-folded query, so filtering a list folds the query once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
	folded: String,
}

impl SearchQuery {
	pub fn new(query: &str) -> Self {
		Self {
			folded: fold(query.trim()),
		}
	}

	/// A blank query matches everything
	pub fn is_blank(&self) -> bool {
		self.folded.is_empty()
	}

	pub fn matches(&self, haystack: &str) -> bool {
		self.is_blank() || fold(haystack).contains(&self.folded)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fold_strips_accents_and_case() {
		assert_eq!(fold("São Paulo"), "sao paulo");
		assert_eq!(fold("CONGÊNERES"), "congeneres");
		assert_eq!(fold("Ribeirão Preto"), "ribeirao preto");
	}

	#[test]
	fn test_query_matching() {
		assert!(SearchQuery::new("sao").matches("São Paulo"));
		assert!(SearchQuery::new("  PAULO ").matches("São Paulo"));
		assert!(SearchQuery::new("ção").matches("Conceição"));
		assert!(!SearchQuery::new("rio").matches("São Paulo"));
		assert!(SearchQuery::new("").matches("anything"));
	}
}
