//! Startup logging for the QuoteDesk client

use crate::Settings;
use std::env;
use tracing::{info, warn};

/// Logs client information and the effective configuration at startup
pub fn log_service_info(settings: &Settings) {
	info!("=== QuoteDesk starting ===");
	info!("🚀 Version: {}", env!("CARGO_PKG_VERSION"));
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}
	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level (RUST_LOG): {}", rust_log);
	}
	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!("🌐 API: {} (timeout {}ms)", settings.api.base_url, settings.api.timeout_ms);
	match &settings.api.token {
		Some(token) => info!("🔑 API token from {}", token.description()),
		None => warn!("🔑 No API token configured, requests go out unauthenticated"),
	}
	match &settings.storage.preferences_path {
		Some(path) => info!("💾 Preferences file: {}", path),
		None => info!("💾 Preferences kept in memory"),
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs shutdown information
pub fn log_service_shutdown() {
	info!(
		"🛑 QuoteDesk finished at {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}
