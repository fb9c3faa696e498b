//! Per-tab aggregation of plan notes

use lazy_static::lazy_static;
use quotedesk_types::{NoteTab, Plan, Quote, QuoteType};
use regex::Regex;
use tracing::debug;

use crate::rich_text::{self, RichText};

lazy_static! {
	static ref LINK_PATTERN: Regex =
		Regex::new(r#"https?://[^\s<>"']+"#).expect("link pattern is valid");
}

/// One accordion row: a plan with content under the tab
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEntry<'a> {
	pub plan: &'a Plan,
	/// Trimmed source text as stored on the plan
	pub content: &'a str,
	pub links: Vec<String>,
	pub text: RichText,
}

/// Plans of the track with non-empty content under `tab`, in plan order
pub fn notes_for_tab<'a>(quote: &'a Quote, track: QuoteType, tab: NoteTab) -> Vec<NoteEntry<'a>> {
	let entries: Vec<NoteEntry<'a>> = quote
		.plans_of_type(track)
		.filter_map(|plan| {
			let content = plan.note(tab)?.trim();
			if content.is_empty() {
				return None;
			}
			Some(NoteEntry {
				plan,
				content,
				links: extract_links(content),
				text: rich_text::normalize(content),
			})
		})
		.collect();

	debug!(
		"Quote {} tab {}: {} plan(s) with content",
		quote.id,
		tab,
		entries.len()
	);
	entries
}

/// Tabs with at least one entry for the track
pub fn tabs_with_content(quote: &Quote, track: QuoteType) -> Vec<NoteTab> {
	NoteTab::ALL
		.iter()
		.copied()
		.filter(|tab| {
			quote
				.plans_of_type(track)
				.any(|plan| plan.note(*tab).map_or(false, |n| !n.trim().is_empty()))
		})
		.collect()
}

/// Distinct HTTP(S) links in order of appearance, read from the
/// entity-decoded text so `&amp;` in an href comes back as `&`
pub fn extract_links(text: &str) -> Vec<String> {
	let decoded = rich_text::decode_entities(text);
	let mut links: Vec<String> = Vec::new();
	for found in LINK_PATTERN.find_iter(&decoded) {
		let link = found
			.as_str()
			.trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | ')' | '!' | '?'));
		if !links.iter().any(|l| l == link) {
			links.push(link.to_string());
		}
	}
	links
}
