//! GraphQL client for the profile API

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use trailhead_types::{GraphqlRequest, GraphqlResponse, UpstreamError, UpstreamResult};

use crate::http::read_body;

#[derive(Debug, Clone)]
pub struct GraphqlClient {
	client: Client,
	endpoint: String,
}

impl GraphqlClient {
	pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
		Self {
			client,
			endpoint: endpoint.into(),
		}
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// POST a document and return its `data` object.
	///
	/// Errors reported alongside data are logged and dropped; errors without
	/// data fail the call.
	pub async fn execute<V, T>(&self, request: &GraphqlRequest<V>) -> UpstreamResult<T>
	where
		V: Serialize,
		T: DeserializeOwned,
	{
		debug!(
			"Executing GraphQL operation {} against {}",
			request.operation_name, self.endpoint
		);

		let response = self
			.client
			.post(&self.endpoint)
			.json(request)
			.send()
			.await
			.map_err(UpstreamError::HttpError)?;
		let body = read_body(response).await?;

		let envelope: GraphqlResponse<T> =
			serde_json::from_str(&body).map_err(|e| UpstreamError::InvalidResponse {
				reason: format!(
					"Failed to parse {} response: {}",
					request.operation_name, e
				),
			})?;

		match envelope.data {
			Some(data) => {
				if !envelope.errors.is_empty() {
					debug!(
						"{} returned data with {} partial error(s)",
						request.operation_name,
						envelope.errors.len()
					);
				}
				Ok(data)
			},
			None if !envelope.errors.is_empty() => Err(UpstreamError::Graphql {
				messages: envelope.errors.into_iter().map(|e| e.message).collect(),
			}),
			None => Err(UpstreamError::invalid_response(format!(
				"{} response had neither data nor errors",
				request.operation_name
			))),
		}
	}
}
