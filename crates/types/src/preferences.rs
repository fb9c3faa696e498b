//! Locally persisted user preferences

use serde::{Deserialize, Serialize};

/// Colour scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	Light,
	Dark,
	#[default]
	System,
}

/// The few scalar preferences kept on the device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
	pub display_name: Option<String>,
	pub avatar_url: Option<String>,
	pub company_logo_url: Option<String>,
	pub theme: ThemeMode,
}

impl UserPreferences {
	pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
		self.display_name = Some(name.into());
		self
	}

	pub fn with_theme(mut self, theme: ThemeMode) -> Self {
		self.theme = theme;
		self
	}

	/// Name used to sign shared messages, if set
	pub fn signature(&self) -> Option<&str> {
		self.display_name
			.as_deref()
			.map(str::trim)
			.filter(|s| !s.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_partial_preferences_fill_defaults() {
		let prefs: UserPreferences = serde_json::from_value(json!({ "displayName": "Ana" })).unwrap();
		assert_eq!(prefs.signature(), Some("Ana"));
		assert_eq!(prefs.theme, ThemeMode::System);
		assert_eq!(prefs.avatar_url, None);
	}

	#[test]
	fn test_blank_display_name_has_no_signature() {
		let prefs = UserPreferences::default().with_display_name("  ");
		assert_eq!(prefs.signature(), None);
	}
}
