//! Profile page models
//!
//! The public profile page embeds the trailblazer's details as a JSON object
//! assigned to `var profile`. [`Profile`] is that object; [`ProfileReturn`] is
//! the shape handed back to callers.

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Prefix shared by every Salesforce user record ID
pub const USER_ID_PREFIX: &str = "005";

/// Returns true when the value looks like a user record ID rather than a handle
pub fn is_user_id(value: &str) -> bool {
	value.starts_with(USER_ID_PREFIX)
}

/// Profile object embedded in the public profile page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	pub id: Option<String>,
	pub photo_url: Option<String>,
	pub role: Option<String>,
	pub company: Option<Company>,
	pub title: Option<String>,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Company {
	pub name: Option<String>,
}

/// Profile data returned by `/trailblazer/{id}/profile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProfileReturn {
	pub profile_photo_url: String,
	pub profile_user: ProfileUser,
}

/// User fields keep their record-style casing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProfileUser {
	#[serde(rename = "TBID_Role")]
	pub tbid_role: String,
	#[serde(rename = "CompanyName")]
	pub company_name: String,
	#[serde(rename = "TrailblazerId")]
	pub trailblazer_id: String,
	#[serde(rename = "Title")]
	pub title: String,
	#[serde(rename = "FirstName")]
	pub first_name: String,
	#[serde(rename = "LastName")]
	pub last_name: String,
	#[serde(rename = "Id")]
	pub id: String,
}

impl ProfileReturn {
	/// Reshape an embedded profile, recording the handle it was requested with
	pub fn from_profile(profile: Profile, trailblazer_id: &str) -> Self {
		Self {
			profile_photo_url: profile.photo_url.unwrap_or_default(),
			profile_user: ProfileUser {
				tbid_role: profile.role.unwrap_or_default(),
				company_name: profile
					.company
					.and_then(|c| c.name)
					.unwrap_or_default(),
				trailblazer_id: trailblazer_id.to_string(),
				title: profile.title.unwrap_or_default(),
				first_name: profile.first_name.unwrap_or_default(),
				last_name: profile.last_name.unwrap_or_default(),
				id: profile.id.unwrap_or_default(),
			},
		}
	}
}
