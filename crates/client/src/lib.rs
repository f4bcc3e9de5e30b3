//! Trailhead Client
//!
//! HTTP clients for the three upstream flavors the proxy talks to: the
//! profile GraphQL API, the public profile page, and the legacy Aura RPC
//! endpoint.

pub mod aura;
pub mod graphql;
pub mod http;
pub mod profile_page;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

pub use aura::{extract_fwuid, AuraClient, FwuidCache};
pub use graphql::GraphqlClient;
pub use http::build_http_client;
pub use profile_page::{extract_profile, ProfilePageClient};
pub use trailhead_types::{UpstreamError, UpstreamResult};

use trailhead_config::Settings;

/// All upstream clients, sharing one connection pool
#[derive(Debug, Clone)]
pub struct UpstreamClients {
	pub graphql: GraphqlClient,
	pub profile_page: ProfilePageClient,
	pub aura: AuraClient,
}

impl UpstreamClients {
	pub fn from_settings(settings: &Settings) -> UpstreamResult<Self> {
		let cache = match settings.aura.fwuid_ttl_secs {
			0 => FwuidCache::new(),
			secs => FwuidCache::with_ttl(Duration::from_secs(secs)),
		};
		Self::with_fwuid_cache(settings, Arc::new(cache))
	}

	/// Build the clients around an existing token cache
	pub fn with_fwuid_cache(settings: &Settings, cache: Arc<FwuidCache>) -> UpstreamResult<Self> {
		let client = build_http_client(&settings.upstream)?;
		let upstream = &settings.upstream;

		Ok(Self {
			graphql: GraphqlClient::new(client.clone(), upstream.graphql_url.clone()),
			profile_page: ProfilePageClient::new(client.clone(), upstream.profile_url.clone()),
			aura: AuraClient::new(
				client,
				upstream.aura_url.clone(),
				upstream.fwuid_url.clone(),
				settings.aura.page_uri.clone(),
				cache,
			),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_clients_follow_settings() {
		let mut settings = Settings::default();
		settings.upstream.graphql_url = "http://127.0.0.1:9/graphql".to_string();

		let clients = UpstreamClients::from_settings(&settings).unwrap();
		assert_eq!(clients.graphql.endpoint(), "http://127.0.0.1:9/graphql");
	}
}
