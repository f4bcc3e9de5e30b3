use std::sync::Arc;

use trailhead_service::TrailblazerServiceTrait;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub trailblazer_service: Arc<dyn TrailblazerServiceTrait>,
}

impl AppState {
	pub fn new(trailblazer_service: Arc<dyn TrailblazerServiceTrait>) -> Self {
		Self {
			trailblazer_service,
		}
	}
}
