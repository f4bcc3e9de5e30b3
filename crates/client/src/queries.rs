//! GraphQL documents sent to the profile API
//!
//! The profile API only accepts documents matching its published schema, so
//! these mirror the fragments its own web client sends.

use trailhead_types::{BadgeRequest, BadgeVariables, GraphqlRequest, ProfileVariables};

pub const RANK_OPERATION: &str = "GetTrailheadRank";
pub const SKILLS_OPERATION: &str = "GetEarnedSkills";
pub const CERTIFICATIONS_OPERATION: &str = "GetUserCertifications";
pub const BADGES_OPERATION: &str = "GetTrailheadBadges";

pub const RANK_QUERY: &str = r#"
fragment TrailheadRank on TrailheadRank {
	__typename
	title
	requiredPointsSum
	requiredBadgesCount
	imageUrl
}

fragment PublicProfile on PublicProfile {
	__typename
	trailheadStats {
		__typename
		earnedPointsSum
		earnedBadgesCount
		completedTrailCount
		rank {
			...TrailheadRank
		}
		nextRank {
			...TrailheadRank
		}
	}
}

query GetTrailheadRank($slug: String, $hasSlug: Boolean!) {
	profile(slug: $slug) @include(if: $hasSlug) {
		... on PublicProfile {
			...PublicProfile
		}
		... on PrivateProfile {
			__typename
		}
	}
}"#;

pub const SKILLS_QUERY: &str = r#"
fragment EarnedSkill on EarnedSkill {
	__typename
	earnedPointsSum
	id
	itemProgressEntryCount
	skill {
		__typename
		apiName
		id
		name
	}
}

query GetEarnedSkills($slug: String, $hasSlug: Boolean!) {
	profile(slug: $slug) @include(if: $hasSlug) {
		__typename
		... on PublicProfile {
			id
			earnedSkills {
				...EarnedSkill
			}
		}
	}
}"#;

pub const CERTIFICATIONS_QUERY: &str = r#"
query GetUserCertifications($slug: String, $hasSlug: Boolean!) {
	profile(slug: $slug) @include(if: $hasSlug) {
		__typename
		id
		... on PublicProfile {
			credential {
				messages {
					__typename
					body
					header
					location
					image
					cta {
						__typename
						label
						url
					}
					orientation
				}
				messagesOnly
				brands {
					__typename
					id
					name
					logo
				}
				certifications {
					cta {
						__typename
						label
						url
					}
					dateCompleted
					dateExpired
					downloadLogoUrl
					logoUrl
					infoUrl
					maintenanceDueDate
					product
					publicDescription
					status {
						__typename
						title
						expired
						date
						color
						order
					}
					title
				}
			}
		}
	}
}"#;

pub const BADGES_QUERY: &str = r#"
fragment EarnedAward on EarnedAwardBase {
	__typename
	id
	award {
		__typename
		id
		title
		type
		icon
		content {
			__typename
			webUrl
			description
		}
	}
}

fragment EarnedAwardSelf on EarnedAwardSelf {
	__typename
	id
	award {
		__typename
		id
		title
		type
		icon
		content {
			__typename
			webUrl
			description
		}
	}
	earnedAt
	earnedPointsSum
}

fragment StatsBadgeCount on TrailheadProfileStats {
	__typename
	earnedBadgesCount
	superbadgeCount
}

fragment ProfileBadges on PublicProfile {
	__typename
	trailheadStats {
		... on TrailheadProfileStats {
			...StatsBadgeCount
		}
	}
	earnedAwards(first: $count, after: $after, awardType: $filter) {
		edges {
			node {
				... on EarnedAwardBase {
					...EarnedAward
				}
				... on EarnedAwardSelf {
					...EarnedAwardSelf
				}
			}
		}
		pageInfo {
			...PageInfoBidirectional
		}
	}
}

fragment PageInfoBidirectional on PageInfo {
	__typename
	endCursor
	hasNextPage
	startCursor
	hasPreviousPage
}

query GetTrailheadBadges(
	$slug: String
	$hasSlug: Boolean!
	$count: Int = 8
	$after: String = null
	$filter: AwardTypeFilter = null
) {
	profile(slug: $slug) @include(if: $hasSlug) {
		__typename
		... on PublicProfile {
			...ProfileBadges
		}
	}
}"#;

pub fn rank_request(slug: &str) -> GraphqlRequest<ProfileVariables> {
	GraphqlRequest::new(RANK_OPERATION, ProfileVariables::for_slug(slug), RANK_QUERY)
}

pub fn skills_request(slug: &str) -> GraphqlRequest<ProfileVariables> {
	GraphqlRequest::new(SKILLS_OPERATION, ProfileVariables::for_slug(slug), SKILLS_QUERY)
}

pub fn certifications_request(slug: &str) -> GraphqlRequest<ProfileVariables> {
	GraphqlRequest::new(
		CERTIFICATIONS_OPERATION,
		ProfileVariables::for_slug(slug),
		CERTIFICATIONS_QUERY,
	)
}

pub fn badges_request(slug: &str, request: &BadgeRequest) -> GraphqlRequest<BadgeVariables> {
	GraphqlRequest::new(
		BADGES_OPERATION,
		BadgeVariables::new(slug, request),
		BADGES_QUERY,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use trailhead_types::BadgeFilter;

	#[test]
	fn test_documents_declare_their_operation() {
		for (operation, query) in [
			(RANK_OPERATION, RANK_QUERY),
			(SKILLS_OPERATION, SKILLS_QUERY),
			(CERTIFICATIONS_OPERATION, CERTIFICATIONS_QUERY),
			(BADGES_OPERATION, BADGES_QUERY),
		] {
			assert!(
				query.contains(&format!("query {}", operation)),
				"{} missing from its document",
				operation
			);
		}
	}

	#[test]
	fn test_badges_request_carries_paging() {
		let request = badges_request(
			"astro",
			&BadgeRequest {
				filter: Some(BadgeFilter::Project),
				count: 24,
				after: None,
				skip: Some(24),
			},
		);
		assert_eq!(request.operation_name, BADGES_OPERATION);
		assert_eq!(request.variables.count, 24);
		assert_eq!(request.variables.filter.as_deref(), Some("PROJECT"));
		assert!(request.variables.has_slug);
	}
}
