//! Badge listing request model
//!
//! Badges are requested through optional path segments:
//! `/badges[/{filter}[/{count}[/{after}]]]`. This module turns those raw
//! segments into a validated [`BadgeRequest`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of badges returned when no count is given
pub const DEFAULT_BADGE_COUNT: u32 = 8;

/// Page size used by the Aura badge action when paging with `skip`
pub const AURA_BADGES_PER_PAGE: u32 = 30;

/// Award type filter for badge listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeFilter {
	Module,
	Project,
	Superbadge,
	Event,
	Standalone,
}

impl BadgeFilter {
	/// All filters in the order they are advertised to callers
	pub const ALL: [BadgeFilter; 5] = [
		BadgeFilter::Module,
		BadgeFilter::Project,
		BadgeFilter::Superbadge,
		BadgeFilter::Event,
		BadgeFilter::Standalone,
	];

	/// Lowercase path name
	pub fn as_str(&self) -> &'static str {
		match self {
			BadgeFilter::Module => "module",
			BadgeFilter::Project => "project",
			BadgeFilter::Superbadge => "superbadge",
			BadgeFilter::Event => "event",
			BadgeFilter::Standalone => "standalone",
		}
	}

	/// Value of the GraphQL `AwardTypeFilter` enum
	pub fn as_graphql(&self) -> String {
		self.as_str().to_uppercase()
	}

	/// Title-cased value expected by the Apex badge action
	pub fn as_aura(&self) -> String {
		let name = self.as_str();
		let mut chars = name.chars();
		match chars.next() {
			Some(first) => first.to_uppercase().chain(chars).collect(),
			None => String::new(),
		}
	}

	/// Lowercase names of every valid filter
	pub fn valid_names() -> Vec<&'static str> {
		Self::ALL.iter().map(|f| f.as_str()).collect()
	}
}

impl fmt::Display for BadgeFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for BadgeFilter {
	type Err = BadgeRequestError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.iter()
			.copied()
			.find(|f| f.as_str() == s)
			.ok_or_else(|| BadgeRequestError::InvalidFilter {
				filter: s.to_string(),
			})
	}
}

/// Errors raised while interpreting badge path segments
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BadgeRequestError {
	#[error(
		"Expected badge filter to be one of: {choices}.",
		choices = BadgeFilter::valid_names().join(", ")
	)]
	InvalidFilter { filter: String },

	#[error("Expected badge count to be a whole number, got '{count}'.")]
	InvalidCount { count: String },
}

/// Validated badge listing parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRequest {
	pub filter: Option<BadgeFilter>,
	pub count: u32,
	pub after: Option<String>,
	/// Offset for backends that page by position instead of cursor
	pub skip: Option<u32>,
}

impl Default for BadgeRequest {
	fn default() -> Self {
		Self {
			filter: None,
			count: DEFAULT_BADGE_COUNT,
			after: None,
			skip: None,
		}
	}
}

impl BadgeRequest {
	/// Build a request from the optional `filter`, `count` and `after` path segments.
	///
	/// `all` and an empty filter mean "no filter". The numeric segment is both
	/// the GraphQL page size and the Aura offset.
	pub fn from_path(
		filter: Option<&str>,
		count: Option<&str>,
		after: Option<&str>,
	) -> Result<Self, BadgeRequestError> {
		let filter = match filter {
			None | Some("") | Some("all") => None,
			Some(name) => Some(name.parse::<BadgeFilter>()?),
		};

		let (count, skip) = match count.filter(|c| !c.is_empty()) {
			Some(raw) => {
				let parsed = raw
					.parse::<u32>()
					.map_err(|_| BadgeRequestError::InvalidCount {
						count: raw.to_string(),
					})?;
				(parsed, Some(parsed))
			},
			None => (DEFAULT_BADGE_COUNT, None),
		};

		let after = after.filter(|a| !a.is_empty()).map(str::to_string);

		Ok(Self {
			filter,
			count,
			after,
			skip,
		})
	}
}
