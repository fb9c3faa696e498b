//! Configuration mocks and builders for tests

use quotedesk::config::*;

/// Configuration builders for tests
#[allow(dead_code)]
pub struct MockConfigs;

#[allow(dead_code)]
impl MockConfigs {
	pub const SHARE_BASE_URL: &'static str = "https://cotacao.test/c/";

	/// Settings pointing at an unroutable backend, never contacted in tests
	pub fn test_settings() -> Settings {
		Settings {
			api: ApiSettings {
				base_url: "http://127.0.0.1:9/api/".to_string(),
				timeout_ms: 500,
				token: None,
				user_agent: "QuoteDesk/test".to_string(),
			},
			share: ShareSettings {
				base_url: Self::SHARE_BASE_URL.to_string(),
			},
			storage: StorageSettings {
				preferences_path: None,
			},
			logging: LoggingSettings {
				level: "debug".to_string(),
				format: LogFormat::Compact,
				structured: false,
			},
		}
	}

	pub fn with_preferences_file(path: &std::path::Path) -> Settings {
		let mut settings = Self::test_settings();
		settings.storage.preferences_path = Some(path.display().to_string());
		settings
	}
}
