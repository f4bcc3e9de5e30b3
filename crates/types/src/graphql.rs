//! GraphQL envelope and profile data models
//!
//! Field names follow the upstream schema (camelCase, `__typename`) so that
//! rank, skills and badge data can be returned to callers unchanged.

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::badges::BadgeRequest;

/// Outgoing GraphQL document with its variables
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<V: Serialize> {
	pub operation_name: String,
	pub variables: V,
	pub query: String,
}

impl<V: Serialize> GraphqlRequest<V> {
	pub fn new(operation_name: impl Into<String>, variables: V, query: impl Into<String>) -> Self {
		Self {
			operation_name: operation_name.into(),
			variables,
			query: query.into(),
		}
	}
}

/// Variables shared by every profile query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileVariables {
	pub slug: String,
	pub has_slug: bool,
}

impl ProfileVariables {
	pub fn for_slug(slug: &str) -> Self {
		Self {
			slug: slug.to_string(),
			has_slug: !slug.is_empty(),
		}
	}
}

/// Variables for the paged badge query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeVariables {
	pub slug: String,
	pub has_slug: bool,
	pub count: u32,
	pub after: Option<String>,
	pub filter: Option<String>,
}

impl BadgeVariables {
	pub fn new(slug: &str, request: &BadgeRequest) -> Self {
		Self {
			slug: slug.to_string(),
			has_slug: !slug.is_empty(),
			count: request.count,
			after: request.after.clone(),
			filter: request.filter.map(|f| f.as_graphql()),
		}
	}
}

/// Standard GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
	pub data: Option<T>,
	#[serde(default)]
	pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphqlError {
	pub message: String,
	#[serde(default)]
	pub path: Option<Vec<serde_json::Value>>,
}

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RankData {
	pub profile: Option<RankProfile>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RankProfile {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	#[serde(default)]
	pub trailhead_stats: Option<TrailheadStats>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TrailheadStats {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub earned_points_sum: Option<u64>,
	pub earned_badges_count: Option<u64>,
	pub completed_trail_count: Option<u64>,
	pub rank: Option<TrailheadRank>,
	pub next_rank: Option<TrailheadRank>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TrailheadRank {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub title: Option<String>,
	pub required_points_sum: Option<u64>,
	pub required_badges_count: Option<u64>,
	pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SkillsData {
	pub profile: Option<SkillsProfile>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SkillsProfile {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub id: Option<String>,
	#[serde(default)]
	pub earned_skills: Vec<EarnedSkill>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EarnedSkill {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub earned_points_sum: Option<u64>,
	pub id: Option<String>,
	pub item_progress_entry_count: Option<u64>,
	pub skill: Option<Skill>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Skill {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub api_name: Option<String>,
	pub id: Option<String>,
	pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Certifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificationsData {
	pub profile: Option<CertificationsProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationsProfile {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub id: Option<String>,
	pub credential: Option<Credential>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
	#[serde(default)]
	pub messages_only: Option<bool>,
	#[serde(default)]
	pub brands: Vec<CredentialBrand>,
	#[serde(default)]
	pub certifications: Vec<UpstreamCertification>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialBrand {
	pub id: Option<String>,
	pub name: Option<String>,
	pub logo: Option<String>,
}

/// Certification as reported by the GraphQL credential query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamCertification {
	pub date_completed: Option<String>,
	/// Either a date string or `null`; anything else is treated as absent
	#[serde(default)]
	pub date_expired: serde_json::Value,
	pub download_logo_url: Option<String>,
	pub logo_url: Option<String>,
	pub info_url: Option<String>,
	pub maintenance_due_date: Option<String>,
	pub product: Option<String>,
	pub public_description: Option<String>,
	pub status: Option<CertificationStatus>,
	pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificationStatus {
	pub title: Option<String>,
	pub expired: Option<bool>,
	pub date: Option<String>,
	pub color: Option<String>,
	pub order: Option<i64>,
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BadgesData {
	pub profile: Option<BadgesProfile>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BadgesProfile {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub trailhead_stats: Option<BadgeStats>,
	pub earned_awards: Option<EarnedAwards>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BadgeStats {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub earned_badges_count: Option<u64>,
	pub superbadge_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EarnedAwards {
	#[serde(default)]
	pub edges: Vec<EarnedAwardEdge>,
	pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EarnedAwardEdge {
	pub node: Option<EarnedAward>,
}

/// Either an `EarnedAwardBase` or an `EarnedAwardSelf`; the latter adds the
/// earn date and points.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EarnedAward {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub id: Option<String>,
	pub award: Option<Award>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub earned_at: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub earned_points_sum: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Award {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub id: Option<String>,
	pub title: Option<String>,
	#[serde(rename = "type")]
	pub award_type: Option<String>,
	pub icon: Option<String>,
	pub content: Option<AwardContent>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AwardContent {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub web_url: Option<String>,
	pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
	pub end_cursor: Option<String>,
	#[serde(default)]
	pub has_next_page: bool,
	pub start_cursor: Option<String>,
	#[serde(default)]
	pub has_previous_page: bool,
}
