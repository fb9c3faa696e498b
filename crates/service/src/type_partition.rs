//! Partition of a quote's plans into Health / Dental tracks

use quotedesk_types::{Quote, QuoteType};

/// Distinct plan types present, in first-appearance order
///
/// Plans without a type count as health. Never empty: a quote with no plans
/// yields `[Health]`.
pub fn available_types(quote: &Quote) -> Vec<QuoteType> {
	let mut types = Vec::with_capacity(QuoteType::ALL.len());
	for plan in &quote.plans {
		let quote_type = plan.effective_type();
		if !types.contains(&quote_type) {
			types.push(quote_type);
		}
	}
	if types.is_empty() {
		types.push(QuoteType::Health);
	}
	types
}

/// Keep the requested track when available, otherwise fall back to the first one
pub fn resolve_active_type(available: &[QuoteType], requested: Option<QuoteType>) -> QuoteType {
	match requested {
		Some(quote_type) if available.contains(&quote_type) => quote_type,
		_ => available.first().copied().unwrap_or_default(),
	}
}
