//! Trailblazer handlers

use axum::{
	extract::State,
	http::StatusCode,
	response::Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::handlers::common::{
	error_response, service_error, ApiError, ErrorResponse, RoutePath, INVALID_ROUTE_MESSAGE,
};
use crate::state::AppState;
use trailhead_service::BadgesReturn;
use trailhead_types::{BadgeRequest, CertificationsReturn, ProfileReturn, RankData, SkillsData};

/// Path segments of the badge routes; everything after the handle is optional
#[derive(Debug, Deserialize)]
pub struct BadgePath {
	pub id: String,
	pub filter: Option<String>,
	pub count: Option<String>,
	pub after: Option<String>,
}

/// GET /trailblazer/{id}/profile - Profile details from the public profile page
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/trailblazer/{id}/profile",
    params(("id" = String, Path, description = "Trailblazer handle")),
    responses(
        (status = 200, description = "Profile details", body = ProfileReturn),
        (status = 404, description = "Unknown trailblazer", body = ErrorResponse),
        (status = 503, description = "User ID given or upstream failure", body = ErrorResponse)
    ),
    tag = "trailblazer"
))]
pub async fn get_profile(
	State(state): State<AppState>,
	RoutePath(id): RoutePath<String>,
) -> Result<Json<ProfileReturn>, ApiError> {
	debug!("Getting profile for {}", id);
	let profile = state
		.trailblazer_service
		.profile(&id)
		.await
		.map_err(service_error)?;
	Ok(Json(profile))
}

/// GET /trailblazer/{id}/rank - Points, badge count and rank
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/trailblazer/{id}/rank",
    params(("id" = String, Path, description = "Trailblazer handle or user ID")),
    responses(
        (status = 200, description = "Rank data", body = RankData),
        (status = 404, description = "Unknown trailblazer", body = ErrorResponse),
        (status = 503, description = "Upstream failure", body = ErrorResponse)
    ),
    tag = "trailblazer"
))]
pub async fn get_rank(
	State(state): State<AppState>,
	RoutePath(id): RoutePath<String>,
) -> Result<Json<RankData>, ApiError> {
	let rank = state
		.trailblazer_service
		.rank(&id)
		.await
		.map_err(service_error)?;
	Ok(Json(rank))
}

/// GET /trailblazer/{id}/skills - Earned skills
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/trailblazer/{id}/skills",
    params(("id" = String, Path, description = "Trailblazer handle or user ID")),
    responses(
        (status = 200, description = "Earned skills", body = SkillsData),
        (status = 404, description = "Unknown trailblazer", body = ErrorResponse),
        (status = 503, description = "Upstream failure", body = ErrorResponse)
    ),
    tag = "trailblazer"
))]
pub async fn get_skills(
	State(state): State<AppState>,
	RoutePath(id): RoutePath<String>,
) -> Result<Json<SkillsData>, ApiError> {
	let skills = state
		.trailblazer_service
		.skills(&id)
		.await
		.map_err(service_error)?;
	Ok(Json(skills))
}

/// GET /trailblazer/{id}/certifications - Salesforce certifications
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/trailblazer/{id}/certifications",
    params(("id" = String, Path, description = "Trailblazer handle or user ID")),
    responses(
        (status = 200, description = "Certifications", body = CertificationsReturn),
        (status = 404, description = "Unknown trailblazer", body = ErrorResponse),
        (status = 503, description = "Upstream failure", body = ErrorResponse)
    ),
    tag = "trailblazer"
))]
pub async fn get_certifications(
	State(state): State<AppState>,
	RoutePath(id): RoutePath<String>,
) -> Result<Json<CertificationsReturn>, ApiError> {
	let certifications = state
		.trailblazer_service
		.certifications(&id)
		.await
		.map_err(service_error)?;
	Ok(Json(certifications))
}

/// GET /trailblazer/{id}/badges[/{filter}[/{count}[/{after}]]] - Earned badges
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/trailblazer/{id}/badges/{filter}/{count}/{after}",
    params(
        ("id" = String, Path, description = "Trailblazer handle or user ID"),
        ("filter" = String, Path, description = "all, module, project, superbadge, event or standalone", example = "superbadge"),
        ("count" = u32, Path, description = "Badges per page", example = 8),
        ("after" = String, Path, description = "Cursor of the previous page")
    ),
    responses(
        (status = 200, description = "Earned badges"),
        (status = 404, description = "Unknown trailblazer", body = ErrorResponse),
        (status = 501, description = "Invalid filter or count", body = ErrorResponse),
        (status = 503, description = "Upstream failure", body = ErrorResponse)
    ),
    tag = "trailblazer"
))]
pub async fn get_badges(
	State(state): State<AppState>,
	RoutePath(path): RoutePath<BadgePath>,
) -> Result<Json<BadgesReturn>, ApiError> {
	let request = BadgeRequest::from_path(
		path.filter.as_deref(),
		path.count.as_deref(),
		path.after.as_deref(),
	)
	.map_err(|e| error_response(StatusCode::NOT_IMPLEMENTED, e.to_string()))?;

	debug!(
		"Getting badges for {} (filter: {:?}, count: {})",
		path.id, request.filter, request.count
	);
	let badges = state
		.trailblazer_service
		.badges(&path.id, &request)
		.await
		.map_err(service_error)?;
	Ok(Json(badges))
}

/// Any route that is not served
pub async fn fallback() -> (StatusCode, Json<ErrorResponse>) {
	error_response(StatusCode::NOT_IMPLEMENTED, INVALID_ROUTE_MESSAGE)
}
