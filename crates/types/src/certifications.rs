//! Certification response models

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::graphql::UpstreamCertification;

/// Certifications returned by `/trailblazer/{id}/certifications`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CertificationsReturn {
	#[serde(default)]
	pub certifications_list: Vec<Certification>,
}

/// A single earned certification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
	pub date_completed: String,
	pub certification_url: String,
	pub description: String,
	pub certification_status: String,
	pub title: String,
	pub certification_image_url: String,
	pub date_expired: String,
}

impl From<UpstreamCertification> for Certification {
	fn from(upstream: UpstreamCertification) -> Self {
		let date_expired = match upstream.date_expired {
			serde_json::Value::String(date) => date,
			_ => String::new(),
		};

		Self {
			date_completed: upstream.date_completed.unwrap_or_default(),
			certification_url: upstream.info_url.unwrap_or_default(),
			description: upstream.public_description.unwrap_or_default(),
			certification_status: upstream
				.status
				.and_then(|s| s.title)
				.unwrap_or_default(),
			title: upstream.title.unwrap_or_default(),
			certification_image_url: upstream.logo_url.unwrap_or_default(),
			date_expired,
		}
	}
}

impl FromIterator<Certification> for CertificationsReturn {
	fn from_iter<I: IntoIterator<Item = Certification>>(iter: I) -> Self {
		Self {
			certifications_list: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn upstream(date_expired: serde_json::Value) -> UpstreamCertification {
		serde_json::from_value(json!({
			"dateCompleted": "2021-03-04",
			"dateExpired": date_expired,
			"logoUrl": "https://example.com/pd1.png",
			"infoUrl": "https://example.com/pd1",
			"publicDescription": "Platform Developer I",
			"status": {"title": "Active", "expired": false},
			"title": "Salesforce Certified Platform Developer I"
		}))
		.unwrap()
	}

	#[test]
	fn test_field_mapping() {
		let cert = Certification::from(upstream(json!("2025-03-04")));
		assert_eq!(cert.certification_url, "https://example.com/pd1");
		assert_eq!(cert.certification_image_url, "https://example.com/pd1.png");
		assert_eq!(cert.description, "Platform Developer I");
		assert_eq!(cert.certification_status, "Active");
		assert_eq!(cert.date_expired, "2025-03-04");

		let value = serde_json::to_value(&cert).unwrap();
		assert_eq!(value["certificationStatus"], "Active");
		assert_eq!(value["dateCompleted"], "2021-03-04");
	}

	#[test]
	fn test_non_string_expiry_is_empty() {
		assert_eq!(Certification::from(upstream(json!(null))).date_expired, "");
		assert_eq!(Certification::from(upstream(json!(false))).date_expired, "");
	}

	#[test]
	fn test_collects_into_list() {
		let list: CertificationsReturn = vec![Certification::default(), Certification::default()]
			.into_iter()
			.collect();
		let value = serde_json::to_value(&list).unwrap();
		assert_eq!(value["certificationsList"].as_array().unwrap().len(), 2);
	}
}
