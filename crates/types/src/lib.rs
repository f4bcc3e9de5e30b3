//! Trailhead Types
//!
//! Request and response models shared by the Trailhead proxy crates: the
//! upstream GraphQL, profile page and Aura shapes, and the JSON returned to
//! callers.

pub mod aura;
pub mod badges;
pub mod certifications;
pub mod errors;
pub mod graphql;
pub mod profile;

// Re-export serde_json for convenience
pub use serde_json;

pub use aura::{ApexAction, AuraContext, AuraResponse, OUT_OF_SYNC_MARKER};
pub use badges::{BadgeFilter, BadgeRequest, BadgeRequestError, DEFAULT_BADGE_COUNT};
pub use certifications::{Certification, CertificationsReturn};
pub use errors::{UpstreamError, UpstreamResult};
pub use graphql::{
	BadgeVariables, BadgesData, CertificationsData, GraphqlRequest, GraphqlResponse,
	ProfileVariables, RankData, SkillsData,
};
pub use profile::{is_user_id, Profile, ProfileReturn, ProfileUser};
