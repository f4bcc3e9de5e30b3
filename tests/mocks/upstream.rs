//! In-process stand-in for the Trailhead upstreams
//!
//! Serves the GraphQL API, public profile pages, the Aura bootstrap page and
//! the Aura endpoint from one local axum server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
	extract::{Form, Path, State},
	http::StatusCode,
	response::{Html, IntoResponse, Response},
	routing::{get, post},
	Json, Router,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use trailhead_proxy::Settings;

pub const KNOWN_HANDLE: &str = "astro";
pub const KNOWN_USER_ID: &str = "0051I000004UgTlQAK";
/// Handle for which every upstream reports a server error
pub const BROKEN_HANDLE: &str = "broken";
pub const CURRENT_FWUID: &str = "current-fwuid";

#[derive(Default)]
pub struct UpstreamState {
	pub graphql_calls: AtomicUsize,
	pub aura_calls: AtomicUsize,
	pub fwuid_fetches: AtomicUsize,
	/// Reject every Aura call as out of sync
	pub always_out_of_sync: AtomicBool,
	/// Answer a stale `fwuid` with an empty action list instead of the
	/// out-of-sync event
	pub stale_as_empty_actions: AtomicBool,
	/// Milliseconds the bootstrap page takes to respond
	pub bootstrap_delay_ms: AtomicU64,
	/// Decoded `variables` of the last GraphQL request
	pub last_variables: Mutex<Option<Value>>,
	/// Decoded `message` of the last Aura request
	pub last_message: Mutex<Option<Value>>,
}

pub struct FakeUpstream {
	pub base_url: String,
	pub state: Arc<UpstreamState>,
	handle: JoinHandle<()>,
}

impl FakeUpstream {
	pub async fn spawn() -> Self {
		let state = Arc::new(UpstreamState::default());
		let app = Router::new()
			.route("/graphql", post(graphql))
			.route("/trailblazer/{alias}", get(profile_page))
			.route("/id", get(bootstrap_page))
			.route("/aura", post(aura))
			.with_state(Arc::clone(&state));

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind fake upstream");
		let addr = listener.local_addr().expect("fake upstream address");
		let handle = tokio::spawn(async move {
			axum::serve(listener, app).await.expect("fake upstream");
		});

		Self {
			base_url: format!("http://{}", addr),
			state,
			handle,
		}
	}

	/// Settings pointing every upstream URL at this server
	pub fn settings(&self) -> Settings {
		let mut settings = Settings::default();
		settings.upstream.graphql_url = format!("{}/graphql", self.base_url);
		settings.upstream.profile_url = format!("{}/trailblazer/", self.base_url);
		settings.upstream.aura_url = format!("{}/aura", self.base_url);
		settings.upstream.fwuid_url = format!("{}/id", self.base_url);
		settings.upstream.timeout_ms = 2_000;
		settings
	}

	pub fn aura_calls(&self) -> usize {
		self.state.aura_calls.load(Ordering::SeqCst)
	}

	pub fn fwuid_fetches(&self) -> usize {
		self.state.fwuid_fetches.load(Ordering::SeqCst)
	}
}

impl Drop for FakeUpstream {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

async fn graphql(State(state): State<Arc<UpstreamState>>, Json(body): Json<Value>) -> Response {
	state.graphql_calls.fetch_add(1, Ordering::SeqCst);
	let slug = body["variables"]["slug"].as_str().unwrap_or_default().to_string();
	*state.last_variables.lock().unwrap() = Some(body["variables"].clone());

	if slug == BROKEN_HANDLE {
		return StatusCode::INTERNAL_SERVER_ERROR.into_response();
	}
	if slug != KNOWN_HANDLE && slug != KNOWN_USER_ID {
		return Json(json!({"data": {"profile": null}})).into_response();
	}

	let data = match body["operationName"].as_str().unwrap_or_default() {
		"GetTrailheadRank" => json!({
			"profile": {
				"__typename": "PublicProfile",
				"trailheadStats": {
					"__typename": "TrailheadProfileStats",
					"earnedPointsSum": 123450,
					"earnedBadgesCount": 150,
					"completedTrailCount": 12,
					"rank": {"__typename": "TrailheadRank", "title": "Ranger", "requiredPointsSum": 50000, "requiredBadgesCount": 100, "imageUrl": "https://example.com/ranger.png"},
					"nextRank": null
				}
			}
		}),
		"GetEarnedSkills" => json!({
			"profile": {
				"__typename": "PublicProfile",
				"id": KNOWN_USER_ID,
				"earnedSkills": [{
					"__typename": "EarnedSkill",
					"earnedPointsSum": 4200,
					"id": "skill-1",
					"itemProgressEntryCount": 7,
					"skill": {"__typename": "Skill", "apiName": "apex", "id": "s-1", "name": "Apex"}
				}]
			}
		}),
		"GetUserCertifications" => json!({
			"profile": {
				"__typename": "PublicProfile",
				"id": KNOWN_USER_ID,
				"credential": {
					"messages": [],
					"messagesOnly": false,
					"brands": [],
					"certifications": [{
						"cta": null,
						"dateCompleted": "2021-03-04",
						"dateExpired": null,
						"downloadLogoUrl": "https://example.com/pd1-download.png",
						"logoUrl": "https://example.com/pd1.png",
						"infoUrl": "https://example.com/pd1",
						"maintenanceDueDate": null,
						"product": "Platform",
						"publicDescription": "Platform Developer I",
						"status": {"__typename": "CertificationStatus", "title": "Active", "expired": false, "date": null, "color": "green", "order": 1},
						"title": "Salesforce Certified Platform Developer I"
					}]
				}
			}
		}),
		"GetTrailheadBadges" => json!({
			"profile": {
				"__typename": "PublicProfile",
				"trailheadStats": {"__typename": "TrailheadProfileStats", "earnedBadgesCount": 150, "superbadgeCount": 3},
				"earnedAwards": {
					"edges": [{
						"node": {
							"__typename": "EarnedAwardSelf",
							"id": "award-1",
							"award": {
								"__typename": "Badge",
								"id": "b-1",
								"title": "Apex Specialist",
								"type": "SUPERBADGE",
								"icon": "https://example.com/apex.png",
								"content": {"__typename": "Content", "webUrl": "https://example.com/apex", "description": "Apex superbadge"}
							},
							"earnedAt": "2021-01-01T00:00:00Z",
							"earnedPointsSum": 6000
						}
					}],
					"pageInfo": {"__typename": "PageInfo", "endCursor": "Y3Vyc29y", "hasNextPage": true, "startCursor": "c3RhcnQ=", "hasPreviousPage": false}
				}
			}
		}),
		other => {
			return Json(json!({"errors": [{"message": format!("Unknown operation {}", other)}]}))
				.into_response()
		},
	};

	Json(json!({ "data": data })).into_response()
}

async fn profile_page(Path(alias): Path<String>) -> Response {
	match alias.as_str() {
		KNOWN_HANDLE => Html(format!(
			r#"<html><head><script>
var profile = {{"id":"{}","firstName":"Astro","lastName":"Nomical","title":"Lead Engineer","company":{{"name":"Acme"}},"photoUrl":"https://example.com/astro.png","role":"Developer"}};
</script></head><body></body></html>"#,
			KNOWN_USER_ID
		))
		.into_response(),
		BROKEN_HANDLE => StatusCode::BAD_GATEWAY.into_response(),
		_ => StatusCode::NOT_FOUND.into_response(),
	}
}

async fn bootstrap_page(State(state): State<Arc<UpstreamState>>) -> Html<String> {
	state.fwuid_fetches.fetch_add(1, Ordering::SeqCst);
	let delay = state.bootstrap_delay_ms.load(Ordering::SeqCst);
	if delay > 0 {
		tokio::time::sleep(Duration::from_millis(delay)).await;
	}
	Html(format!(
		r#"<script>window.Aura = {{"initConfig": {{"context": {{"mode": "PROD", "fwuid": "{}", "app": "c:ProfileApp"}}}}}};</script>"#,
		CURRENT_FWUID
	))
}

async fn aura(
	State(state): State<Arc<UpstreamState>>,
	Form(form): Form<HashMap<String, String>>,
) -> Response {
	state.aura_calls.fetch_add(1, Ordering::SeqCst);

	let context: Value = form
		.get("aura.context")
		.and_then(|c| serde_json::from_str(c).ok())
		.unwrap_or_default();
	let message: Value = form
		.get("message")
		.and_then(|m| serde_json::from_str(m).ok())
		.unwrap_or_default();
	*state.last_message.lock().unwrap() = Some(message.clone());

	let stale = context["fwuid"] != CURRENT_FWUID;
	if stale && state.stale_as_empty_actions.load(Ordering::SeqCst) {
		return Json(json!({"actions": [], "context": {"fwuid": CURRENT_FWUID}})).into_response();
	}
	if state.always_out_of_sync.load(Ordering::SeqCst) || stale {
		return Json(json!({
			"event": {"descriptor": "markup://aura:clientOutOfSync"},
			"context": {"fwuid": CURRENT_FWUID}
		}))
		.into_response();
	}

	let params = &message["actions"][0]["params"];
	let return_value = match params["classname"].as_str().unwrap_or_default() {
		"AchievementService" => json!({
			"certificationsResult": {
				"certificationsList": [{
					"dateCompleted": "2020-05-06",
					"certificationUrl": "https://example.com/admin",
					"description": "Administrator",
					"certificationStatus": "ACTIVE",
					"title": "Salesforce Certified Administrator",
					"certificationImageUrl": "https://example.com/admin.png",
					"dateExpired": ""
				}, {
					"dateCompleted": "2021-03-04",
					"certificationUrl": null,
					"description": "Platform Developer I",
					"certificationStatus": "ACTIVE",
					"title": "Salesforce Certified Platform Developer I",
					"certificationImageUrl": "https://example.com/pd1.png",
					"dateExpired": null
				}],
				"statusCode": "200",
				"statusMessage": "OK"
			},
			"isMyTrailheadUser": false
		}),
		"TrailheadProfileService" => {
			let body = json!({
				"count": 1,
				"filter": params["params"]["filter"],
				"skip": params["params"]["skip"],
				"badges": [{"title": "Apex Specialist"}]
			});
			json!({ "body": body.to_string() })
		},
		_ => {
			return Json(json!({
				"actions": [{"id": "212;a", "state": "ERROR", "error": [{"message": "Unknown class"}]}],
				"context": {"fwuid": CURRENT_FWUID}
			}))
			.into_response()
		},
	};

	Json(json!({
		"actions": [{
			"id": "212;a",
			"state": "SUCCESS",
			"returnValue": {"returnValue": return_value, "cacheable": false},
			"error": []
		}],
		"context": {"fwuid": CURRENT_FWUID}
	}))
	.into_response()
}
