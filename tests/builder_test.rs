//! ProxyBuilder tests with a custom trailblazer service

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use trailhead_proxy::{
	serde_json, BadgeRequest, BadgesReturn, CertificationsReturn, ProfileReturn, ProxyBuilder,
	RankData, SkillsData, TrailblazerServiceError, TrailblazerServiceTrait,
};

/// Service answering from fixed data
struct StaticService;

#[async_trait]
impl TrailblazerServiceTrait for StaticService {
	async fn profile(&self, alias: &str) -> Result<ProfileReturn, TrailblazerServiceError> {
		let mut profile = ProfileReturn::default();
		profile.profile_user.trailblazer_id = alias.to_string();
		Ok(profile)
	}

	async fn rank(&self, alias: &str) -> Result<RankData, TrailblazerServiceError> {
		Err(TrailblazerServiceError::NotFound(alias.to_string()))
	}

	async fn skills(&self, _alias: &str) -> Result<SkillsData, TrailblazerServiceError> {
		Ok(SkillsData::default())
	}

	async fn certifications(
		&self,
		_alias: &str,
	) -> Result<CertificationsReturn, TrailblazerServiceError> {
		Ok(CertificationsReturn::default())
	}

	async fn badges(
		&self,
		_alias: &str,
		request: &BadgeRequest,
	) -> Result<BadgesReturn, TrailblazerServiceError> {
		Ok(BadgesReturn::Aura(serde_json::json!({ "count": request.count })))
	}
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
	let response = router
		.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
		.await
		.unwrap();
	let status = response.status();
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	(status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_builder_serves_custom_service() {
	let (router, _state) = ProxyBuilder::new()
		.with_service(Arc::new(StaticService))
		.start()
		.expect("router");

	let (status, body) = get(router.clone(), "/trailblazer/astro").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["profileUser"]["TrailblazerId"], "astro");

	let (status, body) = get(router.clone(), "/trailblazer/astro/badges/module/12").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["count"], 12);

	let (status, _) = get(router, "/trailblazer/astro/rank").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_state_is_shared_with_router() {
	let (_router, state) = ProxyBuilder::new()
		.with_service(Arc::new(StaticService))
		.start()
		.expect("router");

	let skills = state.trailblazer_service.skills("astro").await.unwrap();
	assert!(skills.profile.is_none());
}
