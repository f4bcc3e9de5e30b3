//! Configuration loading utilities
//!
//! Sources, lowest precedence first: built-in defaults, the optional config
//! file (`config/config.*`, or `CONFIG_PATH`), `TRAILHEAD__*` environment
//! variables with `__` nesting, and finally `PORT`.

use std::collections::HashMap;

use config::{Config, Environment, File};
use thiserror::Error;

use crate::settings::{ConfigValidationError, Settings};

const DEFAULT_CONFIG_FILE: &str = "config/config";
const ENV_PREFIX: &str = "TRAILHEAD";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("Failed to load configuration: {0}")]
	Load(#[from] config::ConfigError),

	#[error("Invalid PORT value '{0}'")]
	InvalidPort(String),

	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from the config file and process environment
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	let path = std::env::var("CONFIG_PATH").ok();
	let port = std::env::var("PORT").ok();
	load_config_from(path.as_deref(), None, port.as_deref())
}

/// Load configuration from explicit sources.
///
/// `env` replaces the process environment for the `TRAILHEAD__*` layer when
/// given.
pub fn load_config_from(
	path: Option<&str>,
	env: Option<HashMap<String, String>>,
	port: Option<&str>,
) -> Result<Settings, ConfigLoadError> {
	let file = match path {
		Some(path) => File::with_name(path),
		None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
	};

	let mut builder = Config::builder().add_source(file).add_source(
		Environment::with_prefix(ENV_PREFIX)
			.prefix_separator("__")
			.separator("__")
			.try_parsing(true)
			.source(env),
	);

	if let Some(port) = port.filter(|p| !p.is_empty()) {
		let parsed = port
			.parse::<u16>()
			.map_err(|_| ConfigLoadError::InvalidPort(port.to_string()))?;
		builder = builder.set_override("server.port", i64::from(parsed))?;
	}

	let settings: Settings = builder.build()?.try_deserialize()?;
	settings.validate()?;

	Ok(settings)
}
