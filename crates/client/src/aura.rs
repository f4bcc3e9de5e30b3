//! Aura RPC client
//!
//! Every Aura call carries the framework `fwuid`. It is read from a bootstrap
//! page once, shared by all requests through [`FwuidCache`], and replaced when
//! the endpoint reports the client as out of sync. A rejected call is retried
//! exactly once with the fresh token.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use trailhead_types::aura::{AuraAction, AuraContext, AuraResponse, OUT_OF_SYNC_MARKER};
use trailhead_types::{ApexAction, UpstreamError, UpstreamResult};

use crate::http::read_body;

const FWUID_KEY: &str = "\"fwuid\"";

#[derive(Debug, Clone)]
struct CachedFwuid {
	value: String,
	fetched_at: Instant,
}

/// Process-wide `fwuid` token shared by concurrent requests
#[derive(Debug, Default)]
pub struct FwuidCache {
	token: RwLock<Option<CachedFwuid>>,
	ttl: Option<Duration>,
	/// Held while a missing token is being fetched
	refresh: Mutex<()>,
}

impl FwuidCache {
	/// Cache that keeps a token until the endpoint rejects it
	pub fn new() -> Self {
		Self::default()
	}

	/// Cache that also drops tokens older than `ttl`
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			ttl: Some(ttl),
			..Self::default()
		}
	}

	/// Current token, if one is cached and not expired
	pub async fn get(&self) -> Option<String> {
		let guard = self.token.read().await;
		guard.as_ref().and_then(|cached| {
			let expired = self
				.ttl
				.is_some_and(|ttl| cached.fetched_at.elapsed() > ttl);
			if expired {
				debug!(
					"Cached fwuid expired (age: {:?})",
					cached.fetched_at.elapsed()
				);
				None
			} else {
				Some(cached.value.clone())
			}
		})
	}

	pub async fn set(&self, value: impl Into<String>) {
		*self.token.write().await = Some(CachedFwuid {
			value: value.into(),
			fetched_at: Instant::now(),
		});
	}

	pub async fn invalidate(&self) {
		*self.token.write().await = None;
	}

	/// Cached token, or the one `fetch` produces when none is cached.
	/// Callers racing on an empty cache wait for a single fetch.
	pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> UpstreamResult<String>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = UpstreamResult<String>>,
	{
		if let Some(token) = self.get().await {
			return Ok(token);
		}

		let _refresh = self.refresh.lock().await;
		if let Some(token) = self.get().await {
			return Ok(token);
		}

		let token = fetch().await?;
		self.set(token.clone()).await;
		Ok(token)
	}
}

/// Outcome of a single Aura POST
#[derive(Debug)]
enum Attempt {
	Completed(AuraResponse),
	/// Rejected because of a stale `fwuid`; carries the replacement when the
	/// response included one
	OutOfSync(Option<String>),
}

#[derive(Debug, Clone)]
pub struct AuraClient {
	client: Client,
	aura_url: String,
	fwuid_url: String,
	page_uri: String,
	cache: Arc<FwuidCache>,
}

impl AuraClient {
	pub fn new(
		client: Client,
		aura_url: impl Into<String>,
		fwuid_url: impl Into<String>,
		page_uri: impl Into<String>,
		cache: Arc<FwuidCache>,
	) -> Self {
		Self {
			client,
			aura_url: aura_url.into(),
			fwuid_url: fwuid_url.into(),
			page_uri: page_uri.into(),
			cache,
		}
	}

	pub fn cache(&self) -> &Arc<FwuidCache> {
		&self.cache
	}

	/// Execute one Apex action and return it once it reports success
	pub async fn execute(&self, action: &ApexAction) -> UpstreamResult<AuraAction> {
		let fwuid = self.current_fwuid().await?;

		let response = match self.post_action(action, &fwuid).await? {
			Attempt::Completed(response) => response,
			Attempt::OutOfSync(fresh) => {
				let fresh = match fresh {
					Some(fresh) => fresh,
					None => self.fetch_fwuid().await?,
				};
				info!("Aura fwuid out of sync, retrying with refreshed token");
				self.cache.set(fresh.clone()).await;

				match self.post_action(action, &fresh).await? {
					Attempt::Completed(response) => response,
					Attempt::OutOfSync(_) => {
						self.cache.invalidate().await;
						return Err(UpstreamError::aura(
							"fwuid still rejected after refresh",
						));
					},
				}
			},
		};

		let action = response
			.actions
			.into_iter()
			.next()
			.ok_or_else(|| UpstreamError::aura("response contained no actions"))?;

		if !action.is_success() {
			let errors: Vec<String> = action.error.iter().map(describe_error).collect();
			return Err(UpstreamError::aura(format!(
				"action {} finished in state {}: {}",
				action.id.as_deref().unwrap_or("?"),
				action.state.as_deref().unwrap_or("UNKNOWN"),
				errors.join("; ")
			)));
		}

		Ok(action)
	}

	async fn current_fwuid(&self) -> UpstreamResult<String> {
		self.cache.get_or_fetch(|| self.fetch_fwuid()).await
	}

	/// Read the current `fwuid` from the bootstrap page
	async fn fetch_fwuid(&self) -> UpstreamResult<String> {
		debug!("Fetching fwuid from {}", self.fwuid_url);
		let response = self
			.client
			.get(&self.fwuid_url)
			.send()
			.await
			.map_err(UpstreamError::HttpError)?;
		let body = read_body(response).await?;

		extract_fwuid(&body)
			.ok_or_else(|| UpstreamError::aura(format!("no fwuid found at {}", self.fwuid_url)))
	}

	async fn post_action(&self, action: &ApexAction, fwuid: &str) -> UpstreamResult<Attempt> {
		let message = action.to_message()?;
		let context = serde_json::to_string(&AuraContext::new(fwuid))?;

		debug!(
			"Posting Aura action {}.{} to {}",
			action.params.classname, action.params.method, self.aura_url
		);

		let response = self
			.client
			.post(&self.aura_url)
			.form(&[
				("message", message.as_str()),
				("aura.context", context.as_str()),
				("aura.pageURI", self.page_uri.as_str()),
				("aura.token", "undefined"),
			])
			.send()
			.await
			.map_err(UpstreamError::HttpError)?;
		let body = read_body(response).await?;

		classify_response(&body, fwuid)
	}
}

/// Decide whether an Aura response body answered the call or rejected `fwuid`
fn classify_response(body: &str, fwuid: &str) -> UpstreamResult<Attempt> {
	let parsed: AuraResponse = match serde_json::from_str(body) {
		Ok(parsed) => parsed,
		// Rejections are not always valid JSON
		Err(_) if body.contains(OUT_OF_SYNC_MARKER) => {
			warn!("Aura endpoint reported clientOutOfSync");
			return Ok(Attempt::OutOfSync(extract_fwuid(body)));
		},
		Err(e) => {
			return Err(UpstreamError::InvalidResponse {
				reason: format!("Failed to parse Aura response: {}", e),
			})
		},
	};

	if parsed.is_out_of_sync(fwuid) {
		warn!("Aura endpoint reported clientOutOfSync");
		let fresh = parsed
			.returned_fwuid()
			.filter(|f| *f != fwuid)
			.map(str::to_string);
		return Ok(Attempt::OutOfSync(fresh));
	}

	Ok(Attempt::Completed(parsed))
}

/// Find the `"fwuid": "<token>"` pair in a bootstrap page or Aura response
pub fn extract_fwuid(body: &str) -> Option<String> {
	let mut search = body;
	while let Some(index) = search.find(FWUID_KEY) {
		let rest = search[index + FWUID_KEY.len()..].trim_start();
		if let Some(value) = rest.strip_prefix(':') {
			let token = serde_json::Deserializer::from_str(value.trim_start())
				.into_iter::<String>()
				.next()
				.and_then(Result::ok);
			if let Some(token) = token.filter(|t| !t.is_empty()) {
				return Some(token);
			}
		}
		search = &search[index + FWUID_KEY.len()..];
	}
	None
}

fn describe_error(error: &Value) -> String {
	error
		.get("message")
		.and_then(Value::as_str)
		.map(str::to_string)
		.unwrap_or_else(|| error.to_string())
}
