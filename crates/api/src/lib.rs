//! Trailhead API
//!
//! Axum routes and middleware serving trailblazer data as JSON.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use router::create_router;
pub use state::AppState;

#[cfg(feature = "openapi")]
pub mod openapi;
