//! Trailhead Config
//!
//! Configuration management and startup utilities for the Trailhead proxy.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	AuraSettings, Backend, ConfigValidationError, LogFormat, LoggingSettings, ServerSettings,
	Settings, UpstreamSettings,
};
pub use startup_logger::{
	log_service_info, log_service_shutdown, log_startup_complete, log_upstream_settings,
};
