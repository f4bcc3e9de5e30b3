//! Error types for upstream calls

use thiserror::Error;

/// Errors raised while talking to the profile site
#[derive(Error, Debug)]
pub enum UpstreamError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("GraphQL errors: {}", messages.join("; "))]
	Graphql { messages: Vec<String> },

	#[error("Profile not found: {alias}")]
	ProfileNotFound { alias: String },

	#[error("Aura call failed: {reason}")]
	Aura { reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },
}

impl UpstreamError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			UpstreamError::HttpStatusError { status_code, .. } => Some(*status_code),
			UpstreamError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}

	pub fn invalid_response(reason: impl Into<String>) -> Self {
		Self::InvalidResponse {
			reason: reason.into(),
		}
	}

	pub fn aura(reason: impl Into<String>) -> Self {
		Self::Aura {
			reason: reason.into(),
		}
	}
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;
