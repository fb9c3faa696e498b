//! JSON file preference storage

use crate::traits::{PreferencesStorage, StorageError, StorageResult};
use async_trait::async_trait;
use quotedesk_types::UserPreferences;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Stores preferences as a single JSON document on disk
///
/// Writes go to a sibling temporary file that is renamed over the target,
/// so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStore {
	path: PathBuf,
}

impl FileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn temp_path(&self) -> PathBuf {
		let mut name = self
			.path
			.file_name()
			.map(|n| n.to_os_string())
			.unwrap_or_else(|| "preferences.json".into());
		name.push(".tmp");
		self.path.with_file_name(name)
	}
}

#[async_trait]
impl PreferencesStorage for FileStore {
	async fn load(&self) -> StorageResult<Option<UserPreferences>> {
		let contents = match fs::read_to_string(&self.path).await {
			Ok(contents) => contents,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				debug!("No preferences file at {}", self.path.display());
				return Ok(None);
			},
			Err(e) => return Err(e.into()),
		};

		if contents.trim().is_empty() {
			return Ok(None);
		}

		let preferences = serde_json::from_str(&contents).map_err(|e| {
			StorageError::Serialization {
				message: format!("{}: {}", self.path.display(), e),
			}
		})?;
		Ok(Some(preferences))
	}

	async fn save(&self, preferences: &UserPreferences) -> StorageResult<()> {
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).await?;
		}

		let body = serde_json::to_vec_pretty(preferences)?;
		let temp = self.temp_path();
		fs::write(&temp, body).await?;
		fs::rename(&temp, &self.path).await?;

		info!("Saved preferences to {}", self.path.display());
		Ok(())
	}

	async fn clear(&self) -> StorageResult<()> {
		match fs::remove_file(&self.path).await {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e.into()),
		}
	}

	async fn health_check(&self) -> StorageResult<bool> {
		match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			Some(parent) => Ok(fs::metadata(parent).await.is_ok()),
			None => Ok(true),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use quotedesk_types::ThemeMode;

	#[tokio::test]
	async fn test_missing_file_loads_nothing() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::new(dir.path().join("prefs.json"));
		assert_eq!(store.load().await.unwrap(), None);
	}

	#[tokio::test]
	async fn test_save_then_load() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::new(dir.path().join("nested").join("prefs.json"));
		let prefs = UserPreferences::default()
			.with_display_name("João")
			.with_theme(ThemeMode::Light);

		store.save(&prefs).await.unwrap();
		assert_eq!(store.load().await.unwrap(), Some(prefs));
		assert!(!store.temp_path().exists());
	}

	#[tokio::test]
	async fn test_corrupt_file_is_a_serialization_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("prefs.json");
		std::fs::write(&path, "{not json").unwrap();

		let store = FileStore::new(&path);
		assert!(matches!(
			store.load().await,
			Err(StorageError::Serialization { .. })
		));
	}

	#[tokio::test]
	async fn test_clear_is_idempotent() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::new(dir.path().join("prefs.json"));
		store.save(&UserPreferences::default()).await.unwrap();
		store.clear().await.unwrap();
		store.clear().await.unwrap();
		assert_eq!(store.load().await.unwrap(), None);
		assert!(store.health_check().await.unwrap());
	}
}
