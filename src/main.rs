//! Trailhead Proxy Server
//!
//! Main entry point for the proxy server

use trailhead_proxy::ProxyBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	ProxyBuilder::new().start_server().await
}
