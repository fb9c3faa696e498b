//! Configuration loading utilities

use crate::{ConfigValidationError, Settings};
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;
use tracing::debug;

/// Default configuration file, without extension
pub const DEFAULT_CONFIG_FILE: &str = "config/config";

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("Failed to read configuration: {0}")]
	Source(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from `CONFIG_PATH` or the default file, overlaid with
/// `QUOTEDESK__*` environment variables
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
	load_config_from(&path)
}

/// Load configuration from a specific file (any format the `config` crate
/// recognises by extension); a missing file falls back to defaults
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	debug!("Loading configuration from {}", path);

	let defaults = Config::try_from(&Settings::default())?;
	let s = Config::builder()
		.add_source(defaults)
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix("QUOTEDESK")
				.prefix_separator("__")
				.separator("__"),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}
