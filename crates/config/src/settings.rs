//! Configuration settings structures

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub upstream: UpstreamSettings,
	pub aura: AuraSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 8000,
		}
	}
}

/// Which upstream flavor serves certifications and badges
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
	#[default]
	Graphql,
	Aura,
}

/// Upstream endpoints and HTTP client behaviour
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UpstreamSettings {
	pub graphql_url: String,
	/// Public profile page prefix; the handle is appended
	pub profile_url: String,
	pub aura_url: String,
	/// Page whose bootstrap data carries the current `fwuid`
	pub fwuid_url: String,
	pub backend: Backend,
	pub timeout_ms: u64,
	pub user_agent: String,
	pub accept_language: String,
}

impl Default for UpstreamSettings {
	fn default() -> Self {
		Self {
			graphql_url: "https://profile.api.trailhead.com/graphql".to_string(),
			profile_url: "https://www.salesforce.com/trailblazer/".to_string(),
			aura_url: "https://trailblazer.me/aura".to_string(),
			fwuid_url: "https://trailblazer.me/id".to_string(),
			backend: Backend::Graphql,
			timeout_ms: 10_000,
			user_agent: format!("trailhead-proxy/{}", env!("CARGO_PKG_VERSION")),
			accept_language: "en-US,en;q=0.5".to_string(),
		}
	}
}

/// Apex actions used by the Aura backend
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AuraSettings {
	pub certifications_class: String,
	pub certifications_method: String,
	pub badges_class: String,
	pub badges_method: String,
	/// Sent as `aura.pageURI`
	pub page_uri: String,
	/// Age after which a cached `fwuid` is refetched; 0 keeps it until rejected
	pub fwuid_ttl_secs: u64,
}

impl Default for AuraSettings {
	fn default() -> Self {
		Self {
			certifications_class: "AchievementService".to_string(),
			certifications_method: "fetchAchievements".to_string(),
			badges_class: "TrailheadProfileService".to_string(),
			badges_method: "fetchTrailheadBadges".to_string(),
			page_uri: "/id".to_string(),
			fwuid_ttl_secs: 3600,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Errors found while validating loaded settings
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("Invalid URL for {field}: '{value}'")]
	InvalidUrl { field: &'static str, value: String },

	#[error("{field} must be greater than zero")]
	Zero { field: &'static str },
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	pub fn is_aura_backend(&self) -> bool {
		self.upstream.backend == Backend::Aura
	}

	/// Check the values the service cannot run without
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.server.port == 0 {
			return Err(ConfigValidationError::Zero {
				field: "server.port",
			});
		}
		if self.upstream.timeout_ms == 0 {
			return Err(ConfigValidationError::Zero {
				field: "upstream.timeout_ms",
			});
		}

		let urls = [
			("upstream.graphql_url", &self.upstream.graphql_url),
			("upstream.profile_url", &self.upstream.profile_url),
			("upstream.aura_url", &self.upstream.aura_url),
			("upstream.fwuid_url", &self.upstream.fwuid_url),
		];
		for (field, value) in urls {
			if Url::parse(value).is_err() {
				return Err(ConfigValidationError::InvalidUrl {
					field,
					value: value.clone(),
				});
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_valid() {
		let settings = Settings::default();
		assert_eq!(settings.server.port, 8000);
		assert_eq!(settings.bind_address(), "0.0.0.0:8000");
		assert_eq!(settings.upstream.backend, Backend::Graphql);
		assert!(!settings.is_aura_backend());
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_rejects_bad_url() {
		let mut settings = Settings::default();
		settings.upstream.graphql_url = "not a url".to_string();
		assert_eq!(
			settings.validate(),
			Err(ConfigValidationError::InvalidUrl {
				field: "upstream.graphql_url",
				value: "not a url".to_string(),
			})
		);
	}

	#[test]
	fn test_rejects_zero_timeout() {
		let mut settings = Settings::default();
		settings.upstream.timeout_ms = 0;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::Zero { .. })
		));
	}

	#[test]
	fn test_partial_document_keeps_defaults() {
		let settings: Settings = serde_json::from_str(
			r#"{"upstream": {"backend": "aura", "timeout_ms": 2500}, "logging": {"format": "json"}}"#,
		)
		.unwrap();
		assert!(settings.is_aura_backend());
		assert_eq!(settings.upstream.timeout_ms, 2500);
		assert_eq!(
			settings.upstream.graphql_url,
			"https://profile.api.trailhead.com/graphql"
		);
		assert_eq!(settings.logging.format, LogFormat::Json);
		assert_eq!(settings.server.port, 8000);
	}
}
