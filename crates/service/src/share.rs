//! Shareable text summary of a quote
//!
//! The output is plain text with WhatsApp-style `*bold*` section titles and is
//! fully determined by the snapshot, the selection and the share base URL.

use quotedesk_types::{Quote, QuoteType};
use tracing::debug;

use crate::selection::{selected_products, SelectedProduct, SelectionSet};

pub const SHARE_FOOTER: &str = "Qualquer dúvida, estou à disposição!";

/// Public link to the quote
///
/// The backend's share URL wins; otherwise the slug is appended to the
/// configured base.
pub fn share_link(quote: &Quote, share_base_url: &str) -> String {
	if let Some(url) = quote
		.share_url
		.as_deref()
		.map(str::trim)
		.filter(|u| !u.is_empty())
	{
		return url.to_string();
	}

	let base = share_base_url.trim();
	let slug = quote.slug.trim().trim_start_matches('/');
	if slug.is_empty() {
		return base.to_string();
	}
	if base.ends_with('/') {
		format!("{}{}", base, slug)
	} else {
		format!("{}/{}", base, slug)
	}
}

/// Build the message copied to the clipboard or sent to messaging apps
pub fn build_share_message(quote: &Quote, selection: &SelectionSet, share_base_url: &str) -> String {
	let mut out = String::new();

	match quote.client_label() {
		Some(client) => out.push_str(&format!(
			"Olá, {}! Segue a cotação de planos preparada para você.\n",
			client
		)),
		None => out.push_str("Olá! Segue a cotação de planos preparada para você.\n"),
	}

	for track in QuoteType::ALL {
		let products = selected_products(quote, track, selection);
		if products.is_empty() {
			continue;
		}
		out.push('\n');
		out.push_str(&format!("*{}*\n", track.section_title()));
		write_track(&mut out, &products);
	}

	out.push('\n');
	out.push_str(&format!(
		"Veja todos os detalhes: {}\n",
		share_link(quote, share_base_url)
	));
	out.push('\n');
	out.push_str(SHARE_FOOTER);

	debug!("Built share message for quote {} ({} chars)", quote.id, out.len());
	out
}

/// Plans in order, each followed by its surviving products
fn write_track(out: &mut String, products: &[SelectedProduct<'_>]) {
	let mut current_plan = None;
	for selected in products {
		if current_plan != Some(&selected.plan.id) {
			current_plan = Some(&selected.plan.id);
			match selected.plan.manager_label() {
				Some(manager) => out.push_str(&format!("• {} ({})\n", selected.plan.name, manager)),
				None => out.push_str(&format!("• {}\n", selected.plan.name)),
			}
		}
		match selected.product.accommodation_label() {
			Some(accommodation) => out.push_str(&format!(
				"   - {} ({})\n",
				selected.product.name, accommodation
			)),
			None => out.push_str(&format!("   - {}\n", selected.product.name)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use quotedesk_types::{EntityId, Plan, Product, Table};

	const BASE: &str = "https://cotacao.example.com/c/";

	fn health_quote() -> Quote {
		Quote::new("10", "abc123").with_plan(
			Plan::new("p1", "Amil 400")
				.with_manager("Amil")
				.with_table(
					Table::new("t1")
						.with_product(Product::new("1", "Enfermaria").with_accommodation("Coletiva"))
						.with_product(Product::new("2", "Apartamento")),
				),
		)
	}

	#[test]
	fn test_health_only_message() {
		let message = build_share_message(&health_quote(), &SelectionSet::all(), BASE);
		assert_eq!(
			message,
			"Olá! Segue a cotação de planos preparada para você.\n\
			\n\
			*Planos de Saúde*\n\
			• Amil 400 (Amil)\n\
			\u{20}  - Enfermaria (Coletiva)\n\
			\u{20}  - Apartamento\n\
			\n\
			Veja todos os detalhes: https://cotacao.example.com/c/abc123\n\
			\n\
			Qualquer dúvida, estou à disposição!"
		);
		assert!(!message.contains("Odontológicos"));
	}

	#[test]
	fn test_is_deterministic() {
		let quote = health_quote();
		let selection = SelectionSet::all();
		assert_eq!(
			build_share_message(&quote, &selection, BASE),
			build_share_message(&quote, &selection, BASE)
		);
	}

	#[test]
	fn test_both_tracks_and_selection() {
		let quote = health_quote()
			.with_client_name("  Maria  ")
			.with_plan(
				Plan::new("p2", "Odonto Clin")
					.with_type(QuoteType::Odonto)
					.with_table(Table::new("t2").with_product(Product::new("3", "Dental Plus"))),
			)
			.with_plan(
				Plan::new("p3", "Outro Saúde")
					.with_table(Table::new("t3").with_product(Product::new("4", "Executivo"))),
			);
		let selection = SelectionSet::from_ids(["1", "3"].map(EntityId::from));

		let message = build_share_message(&quote, &selection, BASE);
		assert!(message.starts_with("Olá, Maria!"));
		assert!(message.contains("*Planos de Saúde*\n• Amil 400 (Amil)\n   - Enfermaria (Coletiva)\n\n"));
		assert!(message.contains("*Planos Odontológicos*\n• Odonto Clin\n   - Dental Plus\n"));
		assert!(!message.contains("Apartamento"));
		assert!(!message.contains("Outro Saúde"));
		assert!(message.find("Saúde*").unwrap() < message.find("Odontológicos*").unwrap());
	}

	#[test]
	fn test_share_link() {
		let mut quote = Quote::new("1", "xyz");
		assert_eq!(share_link(&quote, BASE), "https://cotacao.example.com/c/xyz");
		assert_eq!(
			share_link(&quote, "https://cotacao.example.com/c"),
			"https://cotacao.example.com/c/xyz"
		);

		quote.share_url = Some("https://short.example/q1".to_string());
		assert_eq!(share_link(&quote, BASE), "https://short.example/q1");

		quote.share_url = Some("  ".to_string());
		quote.slug = String::new();
		assert_eq!(share_link(&quote, BASE), BASE);
	}

	#[test]
	fn test_empty_quote_has_no_sections() {
		let message = build_share_message(&Quote::new("1", "s"), &SelectionSet::all(), BASE);
		assert!(!message.contains('*'));
		assert!(message.ends_with(SHARE_FOOTER));
	}
}
