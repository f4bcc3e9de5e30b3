pub mod common;
pub mod health;
pub mod trailblazer;

pub use health::health;
pub use trailblazer::{
	fallback, get_badges, get_certifications, get_profile, get_rank, get_skills,
};
