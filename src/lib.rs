//! Trailhead Proxy Library
//!
//! Serves a trailblazer's public Trailhead profile, rank, skills,
//! certifications and badges as plain JSON.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

// Core domain types
pub use trailhead_types::{
	serde_json, BadgeFilter, BadgeRequest, BadgeRequestError, Certification, CertificationsReturn,
	ProfileReturn, RankData, SkillsData, UpstreamError,
};

// Service layer
pub use trailhead_service::{
	BadgesReturn, DataKind, TrailblazerService, TrailblazerServiceError, TrailblazerServiceTrait,
};

// Upstream clients
pub use trailhead_client::{FwuidCache, UpstreamClients};

// API layer
pub use trailhead_api::{create_router, AppState};

// Config
pub use trailhead_config::{
	load_config, log_service_info, log_service_shutdown, log_startup_complete,
	log_upstream_settings, Backend, LogFormat, Settings,
};

pub mod config {
	pub use trailhead_config::*;
}

pub mod client {
	pub use trailhead_client::*;
}

pub mod service {
	pub use trailhead_service::*;
}

pub mod api {
	pub use trailhead_api::*;
}

// Re-export external dependencies for implementing the service trait
pub use async_trait;
pub use reqwest;

/// Builder for the proxy's router and server
#[derive(Default)]
pub struct ProxyBuilder {
	settings: Option<Settings>,
	service: Option<Arc<dyn TrailblazerServiceTrait>>,
}

impl ProxyBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Use these settings instead of loading them at startup
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Serve from a custom trailblazer service instead of the upstream one
	pub fn with_service(mut self, service: Arc<dyn TrailblazerServiceTrait>) -> Self {
		self.service = Some(service);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Build the router and its state without binding a socket
	pub fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();

		let service = match self.service {
			Some(service) => service,
			None => {
				settings.validate()?;
				Arc::new(TrailblazerService::from_settings(&settings)?)
					as Arc<dyn TrailblazerServiceTrait>
			},
		};

		let app_state = AppState::new(service);
		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Start the complete server: loads `.env` and configuration, initializes
	/// tracing, then serves until Ctrl-C
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		Self::init_tracing_from_settings(&settings)?;

		log_service_info();
		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file, environment or defaults"
			}
		);
		log_upstream_settings(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start()?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /trailblazer/{{id}}");
		info!("  GET  /trailblazer/{{id}}/profile");
		info!("  GET  /trailblazer/{{id}}/rank");
		info!("  GET  /trailblazer/{{id}}/skills");
		info!("  GET  /trailblazer/{{id}}/certifications");
		info!("  GET  /trailblazer/{{id}}/badges/{{filter}}/{{count}}/{{after}}");
		if cfg!(feature = "openapi") {
			info!("  GET  /swagger-ui");
			info!("  GET  /api-docs/openapi.json");
		}

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_keeps_settings() {
		let mut settings = Settings::default();
		settings.server.port = 9100;
		let builder = ProxyBuilder::new().with_settings(settings);
		assert_eq!(builder.settings().map(|s| s.server.port), Some(9100));
	}

	#[test]
	fn test_start_rejects_invalid_settings() {
		let mut settings = Settings::default();
		settings.upstream.graphql_url = "not a url".to_string();
		assert!(ProxyBuilder::new().with_settings(settings).start().is_err());
	}

	#[test]
	fn test_start_with_defaults() {
		assert!(ProxyBuilder::new().start().is_ok());
	}
}
