//! Public profile page client
//!
//! The profile page assigns the trailblazer's details to `var profile`. The
//! object after that marker is decoded as exactly one JSON value, so nothing
//! depends on what follows it on the line.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;
use trailhead_types::{Profile, UpstreamError, UpstreamResult};
use url::Url;

pub const PROFILE_MARKER: &str = "var profile = ";

#[derive(Debug, Clone)]
pub struct ProfilePageClient {
	client: Client,
	base_url: String,
}

impl ProfilePageClient {
	pub fn new(client: Client, base_url: impl Into<String>) -> Self {
		Self {
			client,
			base_url: base_url.into(),
		}
	}

	/// Page URL for a handle, with the handle percent-encoded as one path segment
	pub fn profile_url(&self, alias: &str) -> UpstreamResult<Url> {
		let mut url = Url::parse(&self.base_url).map_err(|e| UpstreamError::ConfigError {
			reason: format!("Invalid profile URL '{}': {}", self.base_url, e),
		})?;
		url.path_segments_mut()
			.map_err(|_| UpstreamError::ConfigError {
				reason: format!("Profile URL '{}' cannot take a path", self.base_url),
			})?
			.pop_if_empty()
			.push(alias);
		Ok(url)
	}

	pub async fn fetch_profile(&self, alias: &str) -> UpstreamResult<Profile> {
		let url = self.profile_url(alias)?;
		debug!("Fetching profile page {}", url);

		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(UpstreamError::HttpError)?;

		let status = response.status();
		if status == StatusCode::NOT_FOUND {
			return Err(UpstreamError::ProfileNotFound {
				alias: alias.to_string(),
			});
		}
		if !status.is_success() {
			return Err(UpstreamError::from_http_failure(status.as_u16()));
		}

		let body = response.text().await.map_err(UpstreamError::HttpError)?;
		extract_profile(&body, alias)
	}
}

/// Decode the profile object embedded in a profile page
pub fn extract_profile(page: &str, alias: &str) -> UpstreamResult<Profile> {
	let not_found = || UpstreamError::ProfileNotFound {
		alias: alias.to_string(),
	};

	let start = page.find(PROFILE_MARKER).ok_or_else(not_found)? + PROFILE_MARKER.len();
	let value = serde_json::Deserializer::from_str(&page[start..])
		.into_iter::<Value>()
		.next()
		.ok_or_else(not_found)?
		.map_err(|e| UpstreamError::InvalidResponse {
			reason: format!("Embedded profile is not valid JSON: {}", e),
		})?;

	if !value.is_object() {
		return Err(not_found());
	}

	serde_json::from_value(value).map_err(|e| UpstreamError::InvalidResponse {
		reason: format!("Embedded profile has an unexpected shape: {}", e),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const PAGE: &str = r#"<html><head><script>
		var settings = {"locale": "en_US"};
		var profile = {"id":"0051I000004UgTlQAK","firstName":"Astro","lastName":"Nomical","title":"Guide; Ranger","company":{"name":"Acme"},"photoUrl":"https://example.com/a.png","role":"Developer"}; var other = 1;
	</script></head></html>"#;

	#[test]
	fn test_extracts_embedded_object() {
		let profile = extract_profile(PAGE, "astro").unwrap();
		assert_eq!(profile.first_name.as_deref(), Some("Astro"));
		// A semicolon inside a string value does not end the object
		assert_eq!(profile.title.as_deref(), Some("Guide; Ranger"));
		assert_eq!(profile.company.unwrap().name.as_deref(), Some("Acme"));
	}

	#[test]
	fn test_missing_marker_is_not_found() {
		let err = extract_profile("<html>nothing here</html>", "ghost").unwrap_err();
		assert!(matches!(err, UpstreamError::ProfileNotFound { alias } if alias == "ghost"));
	}

	#[test]
	fn test_null_profile_is_not_found() {
		let err = extract_profile("var profile = null;", "ghost").unwrap_err();
		assert!(matches!(err, UpstreamError::ProfileNotFound { .. }));
	}

	#[test]
	fn test_truncated_object_is_invalid() {
		let err = extract_profile("var profile = {\"id\": \"005", "astro").unwrap_err();
		assert!(matches!(err, UpstreamError::InvalidResponse { .. }));
	}

	#[test]
	fn test_profile_url_encodes_handle() {
		let client = ProfilePageClient::new(Client::new(), "https://www.salesforce.com/trailblazer/");
		assert_eq!(
			client.profile_url("astro").unwrap().as_str(),
			"https://www.salesforce.com/trailblazer/astro"
		);
		assert_eq!(
			client.profile_url("a/b c").unwrap().as_str(),
			"https://www.salesforce.com/trailblazer/a%2Fb%20c"
		);

		let no_slash = ProfilePageClient::new(Client::new(), "http://127.0.0.1:9000/trailblazer");
		assert_eq!(
			no_slash.profile_url("astro").unwrap().as_str(),
			"http://127.0.0.1:9000/trailblazer/astro"
		);
	}
}
