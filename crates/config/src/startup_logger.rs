//! Service startup logging for the Trailhead proxy
//!
//! Emits a short banner with service, platform and configuration details at
//! startup and shutdown.

use std::env;
use tracing::info;

use crate::settings::Settings;

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "trailhead-proxy";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Trailhead Proxy Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);

	info!("💻 Platform: {}", env::consts::OS);
	info!("🏗️ Architecture: {}", env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the upstream endpoints the proxy will call
pub fn log_upstream_settings(settings: &Settings) {
	let upstream = &settings.upstream;
	info!("🔗 Backend: {:?}", upstream.backend);
	info!("  GraphQL:      {}", upstream.graphql_url);
	info!("  Profile page: {}", upstream.profile_url);
	if settings.is_aura_backend() {
		info!("  Aura:         {}", upstream.aura_url);
		info!("  fwuid source: {}", upstream.fwuid_url);
	}
	info!("  Timeout:      {}ms", upstream.timeout_ms);
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 Trailhead Proxy Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs startup completion information
pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Trailhead Proxy Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
	info!("📡 Ready to accept requests");
}
