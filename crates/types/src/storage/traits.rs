//! Storage traits for pluggable preference stores

use async_trait::async_trait;

use super::StorageResult;
use crate::preferences::UserPreferences;

/// Persistence for the device-local user preferences
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait PreferencesStorage: Send + Sync {
	/// Load stored preferences; `None` when nothing was saved yet
	async fn load(&self) -> StorageResult<Option<UserPreferences>>;

	/// Replace stored preferences
	async fn save(&self, preferences: &UserPreferences) -> StorageResult<()>;

	/// Remove stored preferences
	async fn clear(&self) -> StorageResult<()>;

	/// Check that the backing store is usable
	async fn health_check(&self) -> StorageResult<bool> {
		Ok(true)
	}
}
