//! Aura RPC framing
//!
//! Legacy profile data is served through an Aura endpoint that executes Apex
//! actions. Each call carries a JSON action message and an `aura.context`
//! document; the context embeds the `fwuid` framework token, which the
//! server rejects once it goes stale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::badges::{BadgeFilter, AURA_BADGES_PER_PAGE};
use crate::certifications::Certification;

pub const APEX_DESCRIPTOR: &str = "aura://ApexActionController/ACTION$execute";
pub const PROFILE_APP: &str = "c:ProfileApp";
const PROFILE_APP_MARKUP: &str = "APPLICATION@markup://c:ProfileApp";
const PROFILE_APP_LOADED: &str = "ZoNFIdcxHaEP9RDPdsobUQ";

/// Marker the Aura endpoint includes when the caller's `fwuid` is outdated
pub const OUT_OF_SYNC_MARKER: &str = "clientOutOfSync";

/// `aura.context` form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuraContext {
	pub mode: String,
	pub fwuid: String,
	pub app: String,
	pub loaded: BTreeMap<String, String>,
	pub dn: Vec<String>,
	pub globals: AuraGlobals,
	pub uad: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuraGlobals {
	pub srcdoc: bool,
}

impl AuraContext {
	pub fn new(fwuid: impl Into<String>) -> Self {
		let mut loaded = BTreeMap::new();
		loaded.insert(PROFILE_APP_MARKUP.to_string(), PROFILE_APP_LOADED.to_string());

		Self {
			mode: "PROD".to_string(),
			fwuid: fwuid.into(),
			app: PROFILE_APP.to_string(),
			loaded,
			dn: Vec::new(),
			globals: AuraGlobals { srcdoc: true },
			uad: true,
		}
	}
}

/// Apex action descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApexAction {
	pub id: String,
	pub descriptor: String,
	pub calling_descriptor: String,
	pub params: ApexActionParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApexActionParams {
	pub namespace: String,
	pub classname: String,
	pub method: String,
	pub params: ApexMethodParams,
	pub cacheable: bool,
	pub is_continuation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApexMethodParams {
	pub user_id: String,
	pub language: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub skip: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub per_page: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filter: Option<String>,
}

impl ApexAction {
	pub fn new(class_name: &str, method: &str, user_id: &str) -> Self {
		Self {
			id: "212;a".to_string(),
			descriptor: APEX_DESCRIPTOR.to_string(),
			calling_descriptor: "UNKNOWN".to_string(),
			params: ApexActionParams {
				namespace: String::new(),
				classname: class_name.to_string(),
				method: method.to_string(),
				params: ApexMethodParams {
					user_id: user_id.to_string(),
					language: "en-US".to_string(),
					skip: None,
					per_page: None,
					filter: None,
				},
				cacheable: false,
				is_continuation: false,
			},
		}
	}

	/// Page by offset; the action always returns fixed-size pages
	pub fn with_skip(mut self, skip: u32) -> Self {
		self.params.params.skip = Some(skip);
		self.params.params.per_page = Some(AURA_BADGES_PER_PAGE);
		self
	}

	pub fn with_filter(mut self, filter: BadgeFilter) -> Self {
		self.params.params.filter = Some(filter.as_aura());
		self
	}

	/// `message` form field wrapping this action
	pub fn to_message(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(&AuraMessage {
			actions: std::slice::from_ref(self),
		})
	}
}

#[derive(Serialize)]
struct AuraMessage<'a> {
	actions: &'a [ApexAction],
}

/// Response from the Aura endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuraResponse {
	#[serde(default)]
	pub actions: Vec<AuraAction>,
	#[serde(default)]
	pub context: Option<AuraResponseContext>,
	/// Framework event, sent instead of actions when the call was rejected
	#[serde(default)]
	pub event: Option<AuraEvent>,
}

impl AuraResponse {
	/// Whether the endpoint rejected a call made with `sent_fwuid`.
	///
	/// Only a response without actions can be a rejection: either it carries
	/// the out-of-sync event, or it echoes a different framework token.
	pub fn is_out_of_sync(&self, sent_fwuid: &str) -> bool {
		if !self.actions.is_empty() {
			return false;
		}
		let flagged = self
			.event
			.as_ref()
			.and_then(|e| e.descriptor.as_deref())
			.is_some_and(|d| d.contains(OUT_OF_SYNC_MARKER));
		flagged || self.returned_fwuid().is_some_and(|f| f != sent_fwuid)
	}

	pub fn returned_fwuid(&self) -> Option<&str> {
		self.context.as_ref().and_then(|c| c.fwuid.as_deref())
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuraEvent {
	pub descriptor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuraResponseContext {
	pub fwuid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuraAction {
	pub id: Option<String>,
	pub state: Option<String>,
	pub return_value: Option<AuraReturnEnvelope>,
	#[serde(default)]
	pub error: Vec<serde_json::Value>,
}

impl AuraAction {
	pub fn is_success(&self) -> bool {
		self.state.as_deref() == Some("SUCCESS")
	}

	/// Inner Apex return value, when the action produced one
	pub fn apex_value(&self) -> Option<&ApexReturnValue> {
		self.return_value.as_ref().and_then(|r| r.return_value.as_ref())
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuraReturnEnvelope {
	pub return_value: Option<ApexReturnValue>,
	#[serde(default)]
	pub cacheable: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApexReturnValue {
	/// JSON document encoded as a string
	pub body: Option<String>,
	pub superbadges_result: Option<String>,
	pub certifications_result: Option<CertificationsResult>,
	#[serde(default)]
	pub is_my_trailhead_user: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationsResult {
	#[serde(default)]
	pub certifications_list: Vec<AuraCertification>,
	pub status_code: Option<String>,
	pub status_message: Option<String>,
}

/// Certification as the Aura action reports it; any field may be `null`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuraCertification {
	pub date_completed: Option<String>,
	pub certification_url: Option<String>,
	pub description: Option<String>,
	pub certification_status: Option<String>,
	pub title: Option<String>,
	pub certification_image_url: Option<String>,
	pub date_expired: serde_json::Value,
}

impl From<AuraCertification> for Certification {
	fn from(aura: AuraCertification) -> Self {
		let date_expired = match aura.date_expired {
			serde_json::Value::String(date) => date,
			_ => String::new(),
		};

		Self {
			date_completed: aura.date_completed.unwrap_or_default(),
			certification_url: aura.certification_url.unwrap_or_default(),
			description: aura.description.unwrap_or_default(),
			certification_status: aura.certification_status.unwrap_or_default(),
			title: aura.title.unwrap_or_default(),
			certification_image_url: aura.certification_image_url.unwrap_or_default(),
			date_expired,
		}
	}
}
