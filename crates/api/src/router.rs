use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{
	fallback, get_badges, get_certifications, get_profile, get_rank, get_skills, health,
};
use crate::security::add_security_headers;
use crate::state::AppState;
#[cfg(feature = "openapi")]
use crate::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
#[cfg(feature = "openapi")]
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	// Every route is a GET; bodies are never read
	let body_limit = RequestBodyLimitLayer::new(64 * 1024);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	let base_router = Router::new()
		.route("/health", get(health))
		.route("/health/", get(health))
		.route("/trailblazer/{id}", get(get_profile))
		.route("/trailblazer/{id}/", get(get_profile))
		.route("/trailblazer/{id}/profile", get(get_profile))
		.route("/trailblazer/{id}/profile/", get(get_profile))
		.route("/trailblazer/{id}/rank", get(get_rank))
		.route("/trailblazer/{id}/rank/", get(get_rank))
		.route("/trailblazer/{id}/skills", get(get_skills))
		.route("/trailblazer/{id}/skills/", get(get_skills))
		.route("/trailblazer/{id}/certifications", get(get_certifications))
		.route("/trailblazer/{id}/certifications/", get(get_certifications))
		.route("/trailblazer/{id}/badges", get(get_badges))
		.route("/trailblazer/{id}/badges/", get(get_badges))
		.route("/trailblazer/{id}/badges/{filter}", get(get_badges))
		.route("/trailblazer/{id}/badges/{filter}/", get(get_badges))
		.route("/trailblazer/{id}/badges/{filter}/{count}", get(get_badges))
		.route("/trailblazer/{id}/badges/{filter}/{count}/", get(get_badges))
		.route(
			"/trailblazer/{id}/badges/{filter}/{count}/{after}",
			get(get_badges),
		)
		.route(
			"/trailblazer/{id}/badges/{filter}/{count}/{after}/",
			get(get_badges),
		);

	#[cfg(feature = "openapi")]
	let router = {
		// SwaggerUI automatically provides the OpenAPI JSON endpoint
		base_router
			.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
	};

	#[cfg(not(feature = "openapi"))]
	let router = base_router;

	let router = router
		.fallback(fallback)
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit);

	add_security_headers(router)
}
