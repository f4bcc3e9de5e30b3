//! Shared reqwest client construction

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, ClientBuilder, Response};
use trailhead_config::UpstreamSettings;
use trailhead_types::{UpstreamError, UpstreamResult};

const MAX_IDLE_PER_HOST: usize = 10;
const KEEP_ALIVE_TIMEOUT: Duration = Duration::from_secs(90);

/// Build the HTTP client used for every upstream call
pub fn build_http_client(settings: &UpstreamSettings) -> UpstreamResult<Client> {
	let mut headers = HeaderMap::new();
	headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

	let accept_language = HeaderValue::from_str(&settings.accept_language).map_err(|_| {
		UpstreamError::ConfigError {
			reason: format!("invalid accept_language '{}'", settings.accept_language),
		}
	})?;
	headers.insert(ACCEPT_LANGUAGE, accept_language);

	let user_agent =
		HeaderValue::from_str(&settings.user_agent).map_err(|_| UpstreamError::ConfigError {
			reason: format!("invalid user_agent '{}'", settings.user_agent),
		})?;
	headers.insert(USER_AGENT, user_agent);

	ClientBuilder::new()
		.default_headers(headers)
		.timeout(Duration::from_millis(settings.timeout_ms))
		.pool_max_idle_per_host(MAX_IDLE_PER_HOST)
		.pool_idle_timeout(KEEP_ALIVE_TIMEOUT)
		.tcp_keepalive(Duration::from_secs(60))
		.build()
		.map_err(UpstreamError::HttpError)
}

/// Read a successful response body, turning non-2xx statuses into errors
pub(crate) async fn read_body(response: Response) -> UpstreamResult<String> {
	let status = response.status();
	if !status.is_success() {
		return Err(UpstreamError::from_http_failure(status.as_u16()));
	}
	response.text().await.map_err(UpstreamError::HttpError)
}
