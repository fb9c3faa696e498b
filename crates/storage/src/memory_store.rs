//! In-memory preference storage using DashMap

use crate::traits::{PreferencesStorage, StorageResult};
use async_trait::async_trait;
use dashmap::DashMap;
use quotedesk_types::UserPreferences;
use std::sync::Arc;
use tracing::debug;

const PREFERENCES_KEY: &str = "user_preferences";

/// Process-lifetime preference store; contents are lost on exit
#[derive(Clone, Default)]
pub struct MemoryStore {
	entries: Arc<DashMap<&'static str, UserPreferences>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a store already holding preferences
	pub fn with_preferences(preferences: UserPreferences) -> Self {
		let store = Self::new();
		store.entries.insert(PREFERENCES_KEY, preferences);
		store
	}
}

#[async_trait]
impl PreferencesStorage for MemoryStore {
	async fn load(&self) -> StorageResult<Option<UserPreferences>> {
		Ok(self
			.entries
			.get(PREFERENCES_KEY)
			.map(|entry| entry.value().clone()))
	}

	async fn save(&self, preferences: &UserPreferences) -> StorageResult<()> {
		debug!("Saving preferences to memory store");
		self.entries.insert(PREFERENCES_KEY, preferences.clone());
		Ok(())
	}

	async fn clear(&self) -> StorageResult<()> {
		self.entries.remove(PREFERENCES_KEY);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use quotedesk_types::ThemeMode;

	#[tokio::test]
	async fn test_empty_store_loads_nothing() {
		let store = MemoryStore::new();
		assert_eq!(store.load().await.unwrap(), None);
		assert!(store.health_check().await.unwrap());
	}

	#[tokio::test]
	async fn test_save_load_clear() {
		let store = MemoryStore::new();
		let prefs = UserPreferences::default()
			.with_display_name("Ana Corretora")
			.with_theme(ThemeMode::Dark);

		store.save(&prefs).await.unwrap();
		assert_eq!(store.load().await.unwrap(), Some(prefs));

		store.clear().await.unwrap();
		assert_eq!(store.load().await.unwrap(), None);
	}

	#[tokio::test]
	async fn test_clones_share_state() {
		let store = MemoryStore::with_preferences(UserPreferences::default().with_display_name("A"));
		let other = store.clone();
		other.clear().await.unwrap();
		assert_eq!(store.load().await.unwrap(), None);
	}
}
