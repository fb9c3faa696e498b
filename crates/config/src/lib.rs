//! QuoteDesk Configuration
//!
//! Settings, loading and startup logging for the QuoteDesk client.

pub mod api_token;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use api_token::{ApiToken, ApiTokenError, TokenSource};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	ApiSettings, ConfigValidationError, LogFormat, LoggingSettings, Settings, ShareSettings,
	StorageSettings,
};
pub use startup_logger::{log_service_info, log_service_shutdown};
