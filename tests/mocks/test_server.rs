//! Proxy server bound to a random local port

use std::sync::Arc;

use axum::Router;
use tokio::task::JoinHandle;
use trailhead_proxy::{
	FwuidCache, ProxyBuilder, Settings, TrailblazerService, TrailblazerServiceTrait,
	UpstreamClients,
};

pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

impl TestServer {
	/// Proxy with default settings; upstreams are never reached by the
	/// endpoints exercised with it
	#[allow(dead_code)]
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_settings(Settings::default()).await
	}

	pub async fn spawn_with_settings(
		settings: Settings,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let (app, _) = ProxyBuilder::new().with_settings(settings).start()?;
		Self::spawn_server_with_app(app).await
	}

	/// Proxy whose Aura clients share a caller-owned `fwuid` cache
	#[allow(dead_code)]
	pub async fn spawn_with_fwuid_cache(
		settings: Settings,
		cache: Arc<FwuidCache>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let clients = UpstreamClients::with_fwuid_cache(&settings, cache)?;
		let service = TrailblazerService::new(clients, &settings);
		let (app, _) = ProxyBuilder::new()
			.with_settings(settings)
			.with_service(Arc::new(service) as Arc<dyn TrailblazerServiceTrait>)
			.start()?;
		Self::spawn_server_with_app(app).await
	}

	async fn spawn_server_with_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}", addr);

		let handle = tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});

		Ok(Self { base_url, handle })
	}

	pub fn abort(&self) {
		self.handle.abort();
	}

	/// GET a proxy path and decode the JSON body
	#[allow(dead_code)]
	pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
		let response = reqwest::get(format!("{}{}", self.base_url, path))
			.await
			.unwrap();
		let status = response.status();
		let body = response.json().await.unwrap();
		(status, body)
	}
}
