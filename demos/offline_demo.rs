//! Offline walkthrough of a quote screen
//!
//! Runs the whole stack against the in-memory backend: open a quote, price
//! the featured product, switch tracks, remove a product and share.

use std::sync::Arc;

use quotedesk::mocks::{sample_quote, FixtureQuoteApi};
use quotedesk::{EntityId, MemoryStore, NoteTab, QuoteDeskBuilder, QuoteType, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	println!("📋 QuoteDesk Offline Demo");
	println!("========================");

	let context = QuoteDeskBuilder::new()
		.with_settings(Settings::default())
		.with_api(Arc::new(FixtureQuoteApi::new().with_quote(sample_quote())))
		.with_preferences_storage(Arc::new(MemoryStore::new()))
		.build()
		.await?;

	println!("\n1. Open quote");
	let mut session = context.open_quote(&EntityId::from("1")).await?;
	println!(
		"   ✅ {} with {} product(s) in {:?}",
		session.quote().slug,
		session.products().len(),
		session.available_types()
	);

	println!("\n2. Featured product pricing");
	if let (Some(featured), Some(pricing)) = (session.featured(), session.featured_pricing()) {
		println!("   {}", featured.product.name);
		for line in pricing.render().lines() {
			println!("   {}", line);
		}
	}

	println!("\n3. Notes");
	for entry in session.notes(NoteTab::Discount) {
		println!("   {}: {}", entry.plan.name, entry.text.to_plain_text());
	}

	println!("\n4. Dental track");
	session.set_active_type(QuoteType::Odonto);
	println!(
		"   ✅ Featured: {}",
		session
			.featured()
			.map(|f| f.product.name.as_str())
			.unwrap_or("-")
	);

	println!("\n5. Remove a product");
	session.set_active_type(QuoteType::Health);
	context
		.actions()
		.remove_products(&mut session, &[EntityId::from("101")])
		.await?;
	println!("   ✅ {} health product(s) left", session.products().len());

	println!("\n6. Share");
	context
		.update_preferences(|prefs| prefs.display_name = Some("Corretora Demo".to_string()))
		.await?;
	println!("{}", context.share_message(&session).await);

	Ok(())
}
