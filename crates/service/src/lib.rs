//! Trailhead Service
//!
//! Trailblazer lookups on top of the upstream clients.

pub mod trailblazer;

#[cfg(any(test, feature = "mocks"))]
pub use trailblazer::MockTrailblazerServiceTrait;
pub use trailblazer::{
	BadgesReturn, DataKind, TrailblazerService, TrailblazerServiceError, TrailblazerServiceTrait,
};
