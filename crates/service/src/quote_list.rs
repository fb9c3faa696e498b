//! Search over the quote listing

use quotedesk_types::QuoteListItem;

use crate::text_search::SearchQuery;

/// Quotes whose client name or slug contains `query`, newest first
///
/// Quotes without a creation date sort last, keeping their listing order.
pub fn filter_quotes<'a>(items: &'a [QuoteListItem], query: &str) -> Vec<&'a QuoteListItem> {
	let query = SearchQuery::new(query);
	let mut matches: Vec<&QuoteListItem> = items
		.iter()
		.filter(|item| {
			query.is_blank()
				|| query.matches(&item.slug)
				|| item
					.client_name
					.as_deref()
					.map_or(false, |name| query.matches(name))
		})
		.collect();

	// Stable sort, so ties keep the backend order
	matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
	matches
}

#[cfg(test)]
mod tests {
	use super::*;
	use quotedesk_types::chrono::{TimeZone, Utc};

	fn item(id: &str, client: Option<&str>, day: Option<u32>) -> QuoteListItem {
		QuoteListItem {
			id: id.into(),
			slug: format!("cotacao-{}", id),
			client_name: client.map(str::to_string),
			created_at: day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap()),
			plan_count: 1,
		}
	}

	fn ids(items: &[&QuoteListItem]) -> Vec<String> {
		items.iter().map(|i| i.id.to_string()).collect()
	}

	#[test]
	fn test_newest_first_and_undated_last() {
		let items = vec![
			item("1", Some("Ana"), Some(1)),
			item("2", None, None),
			item("3", Some("João"), Some(20)),
			item("4", Some("Bia"), Some(10)),
		];
		assert_eq!(ids(&filter_quotes(&items, "")), vec!["3", "4", "1", "2"]);
	}

	#[test]
	fn test_search_client_and_slug() {
		let items = vec![
			item("1", Some("Ana Conceição"), Some(1)),
			item("2", Some("José"), Some(2)),
			item("33", None, Some(3)),
		];
		assert_eq!(ids(&filter_quotes(&items, "conceicao")), vec!["1"]);
		assert_eq!(ids(&filter_quotes(&items, "JOSE")), vec!["2"]);
		assert_eq!(ids(&filter_quotes(&items, "cotacao-33")), vec!["33"]);
		assert!(filter_quotes(&items, "maria").is_empty());
	}
}
