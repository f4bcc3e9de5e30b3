use axum::{
	extract::{FromRequestParts, Path},
	http::{request::Parts, StatusCode},
	response::Json,
};
use serde::{de::DeserializeOwned, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use trailhead_service::{DataKind, TrailblazerServiceError};

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
	pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Message for any URL the proxy does not serve
pub const INVALID_ROUTE_MESSAGE: &str =
	"Please provide a valid handle or visit a valid URL. Example: /trailblazer/{id}";

/// `Path` extractor that rejects undecodable segments with the JSON
/// invalid-route error instead of axum's plain-text 400
#[derive(Debug)]
pub struct RoutePath<T>(pub T);

impl<T, S> FromRequestParts<S> for RoutePath<T>
where
	T: DeserializeOwned + Send,
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		match Path::<T>::from_request_parts(parts, state).await {
			Ok(Path(value)) => Ok(Self(value)),
			Err(rejection) => {
				tracing::debug!("Rejected path {}: {}", parts.uri.path(), rejection);
				Err(error_response(StatusCode::NOT_IMPLEMENTED, INVALID_ROUTE_MESSAGE))
			},
		}
	}
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
	(
		status,
		Json(ErrorResponse {
			error: message.into(),
		}),
	)
}

/// Map a service failure to the status and message callers see
pub fn service_error(err: TrailblazerServiceError) -> ApiError {
	match err {
		TrailblazerServiceError::HandleRequired(_) => error_response(
			StatusCode::SERVICE_UNAVAILABLE,
			"/profile requires a trailblazer handle, not an ID as a parameter.",
		),
		TrailblazerServiceError::NotFound(alias) => error_response(
			StatusCode::NOT_FOUND,
			format!(
				"Cannot find profile data for {}. Does this trailblazer exist?",
				alias
			),
		),
		TrailblazerServiceError::Upstream { kind, source } => {
			tracing::warn!("Upstream {} request failed: {}", kind, source);
			let message = match kind {
				DataKind::Profile => "Problem retrieving profile data.".to_string(),
				kind => format!("No {} data returned from Trailhead.", kind),
			};
			error_response(StatusCode::SERVICE_UNAVAILABLE, message)
		},
	}
}
