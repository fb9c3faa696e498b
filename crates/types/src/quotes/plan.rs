//! Plan and table models, plus the note tabs rendered per plan

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lenient;
use super::{EntityId, Product, QuoteType, QuoteValidationError};

/// An operator's offering within a quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
	#[serde(default)]
	pub id: EntityId,
	#[serde(default, deserialize_with = "lenient::string_or_empty")]
	pub name: String,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub manager: Option<String>,
	/// Absent means [`QuoteType::Health`]
	#[serde(default, deserialize_with = "lenient::opt_quote_type")]
	pub quote_type: Option<QuoteType>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub avatar_url: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub manager_avatar_url: Option<String>,

	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub discount_rules: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub documentation: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub grace_period: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub differentials: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub congeners: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub age_limit: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub refund_policy: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub franchise: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub repique: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub commercial_campaigns: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub payment_methods: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub alerts: Option<String>,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub registration_fee: Option<String>,

	#[serde(default, deserialize_with = "lenient::vec_or_empty")]
	pub tables: Vec<Table>,
}

impl Plan {
	pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			..Default::default()
		}
	}

	pub fn with_type(mut self, quote_type: QuoteType) -> Self {
		self.quote_type = Some(quote_type);
		self
	}

	pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
		self.manager = Some(manager.into());
		self
	}

	pub fn with_table(mut self, table: Table) -> Self {
		self.tables.push(table);
		self
	}

	pub fn with_note(mut self, tab: NoteTab, content: impl Into<String>) -> Self {
		*self.note_slot(tab) = Some(content.into());
		self
	}

	/// Track this plan belongs to, defaulting to health
	pub fn effective_type(&self) -> QuoteType {
		self.quote_type.unwrap_or_default()
	}

	/// Manager name, if present and not blank
	pub fn manager_label(&self) -> Option<&str> {
		self.manager
			.as_deref()
			.map(str::trim)
			.filter(|s| !s.is_empty())
	}

	/// Raw note content for a tab
	pub fn note(&self, tab: NoteTab) -> Option<&str> {
		match tab {
			NoteTab::Discount => self.discount_rules.as_deref(),
			NoteTab::Documentation => self.documentation.as_deref(),
			NoteTab::GracePeriod => self.grace_period.as_deref(),
			NoteTab::Differentials => self.differentials.as_deref(),
			NoteTab::Congeners => self.congeners.as_deref(),
			NoteTab::AgeLimit => self.age_limit.as_deref(),
			NoteTab::Refund => self.refund_policy.as_deref(),
			NoteTab::Franchise => self.franchise.as_deref(),
			NoteTab::Repique => self.repique.as_deref(),
			NoteTab::CommercialCampaigns => self.commercial_campaigns.as_deref(),
			NoteTab::PaymentMethods => self.payment_methods.as_deref(),
			NoteTab::Alerts => self.alerts.as_deref(),
			NoteTab::RegistrationFee => self.registration_fee.as_deref(),
		}
	}

	fn note_slot(&mut self, tab: NoteTab) -> &mut Option<String> {
		match tab {
			NoteTab::Discount => &mut self.discount_rules,
			NoteTab::Documentation => &mut self.documentation,
			NoteTab::GracePeriod => &mut self.grace_period,
			NoteTab::Differentials => &mut self.differentials,
			NoteTab::Congeners => &mut self.congeners,
			NoteTab::AgeLimit => &mut self.age_limit,
			NoteTab::Refund => &mut self.refund_policy,
			NoteTab::Franchise => &mut self.franchise,
			NoteTab::Repique => &mut self.repique,
			NoteTab::CommercialCampaigns => &mut self.commercial_campaigns,
			NoteTab::PaymentMethods => &mut self.payment_methods,
			NoteTab::Alerts => &mut self.alerts,
			NoteTab::RegistrationFee => &mut self.registration_fee,
		}
	}

	/// Iterate over every product of every table, in order
	pub fn products(&self) -> impl Iterator<Item = (&Table, &Product)> {
		self.tables
			.iter()
			.flat_map(|table| table.products.iter().map(move |product| (table, product)))
	}
}

/// Grouping container for products inside a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
	#[serde(default)]
	pub id: EntityId,
	#[serde(default, deserialize_with = "lenient::opt_string")]
	pub name: Option<String>,
	#[serde(default, deserialize_with = "lenient::vec_or_empty")]
	pub products: Vec<Product>,
}

impl Table {
	pub fn new(id: impl Into<EntityId>) -> Self {
		Self {
			id: id.into(),
			..Default::default()
		}
	}

	pub fn with_product(mut self, product: Product) -> Self {
		self.products.push(product);
		self
	}
}

/// Free-text note tabs shown per plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteTab {
	Discount,
	Documentation,
	GracePeriod,
	Differentials,
	Congeners,
	AgeLimit,
	Refund,
	Franchise,
	Repique,
	CommercialCampaigns,
	PaymentMethods,
	Alerts,
	RegistrationFee,
}

impl NoteTab {
	pub const ALL: [NoteTab; 13] = [
		NoteTab::Discount,
		NoteTab::Documentation,
		NoteTab::GracePeriod,
		NoteTab::Differentials,
		NoteTab::Congeners,
		NoteTab::AgeLimit,
		NoteTab::Refund,
		NoteTab::Franchise,
		NoteTab::Repique,
		NoteTab::CommercialCampaigns,
		NoteTab::PaymentMethods,
		NoteTab::Alerts,
		NoteTab::RegistrationFee,
	];

	pub fn key(&self) -> &'static str {
		match self {
			Self::Discount => "discount",
			Self::Documentation => "documentation",
			Self::GracePeriod => "grace-period",
			Self::Differentials => "differentials",
			Self::Congeners => "congeners",
			Self::AgeLimit => "age-limit",
			Self::Refund => "refund",
			Self::Franchise => "franchise",
			Self::Repique => "repique",
			Self::CommercialCampaigns => "commercial-campaigns",
			Self::PaymentMethods => "payment-methods",
			Self::Alerts => "alerts",
			Self::RegistrationFee => "registration-fee",
		}
	}

	pub fn title(&self) -> &'static str {
		match self {
			Self::Discount => "Descontos",
			Self::Documentation => "Documentação",
			Self::GracePeriod => "Carência",
			Self::Differentials => "Diferenciais",
			Self::Congeners => "Congêneres",
			Self::AgeLimit => "Limite de idade",
			Self::Refund => "Reembolso",
			Self::Franchise => "Franquia",
			Self::Repique => "Repique",
			Self::CommercialCampaigns => "Campanhas comerciais",
			Self::PaymentMethods => "Formas de pagamento",
			Self::Alerts => "Alertas",
			Self::RegistrationFee => "Taxa de inscrição",
		}
	}
}

impl fmt::Display for NoteTab {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

impl FromStr for NoteTab {
	type Err = QuoteValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
		NoteTab::ALL
			.iter()
			.copied()
			.find(|tab| tab.key() == wanted)
			.ok_or(QuoteValidationError::UnknownNoteTab {
				value: s.to_string(),
			})
	}
}
