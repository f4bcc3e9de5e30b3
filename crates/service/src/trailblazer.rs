//! Trailblazer service
//!
//! Fetches a trailblazer's profile, rank, skills, certifications and badges
//! from the upstream clients and reshapes them for the API.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};
use trailhead_client::{queries, UpstreamClients};
use trailhead_config::{AuraSettings, Backend, Settings};
use trailhead_types::aura::AuraAction;
use trailhead_types::{
	is_user_id, ApexAction, BadgeRequest, BadgesData, Certification, CertificationsData,
	CertificationsReturn, ProfileReturn, RankData, SkillsData, UpstreamError,
};

/// Which piece of trailblazer data a call was fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
	Profile,
	Rank,
	Skills,
	Certifications,
	Badges,
}

impl fmt::Display for DataKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			DataKind::Profile => "profile",
			DataKind::Rank => "rank",
			DataKind::Skills => "skills",
			DataKind::Certifications => "certification",
			DataKind::Badges => "badge",
		};
		f.write_str(name)
	}
}

#[derive(Debug, Error)]
pub enum TrailblazerServiceError {
	#[error("a trailblazer handle is required, got user ID {0}")]
	HandleRequired(String),
	#[error("trailblazer not found: {0}")]
	NotFound(String),
	#[error("failed to fetch {kind} data: {source}")]
	Upstream {
		kind: DataKind,
		#[source]
		source: UpstreamError,
	},
}

impl TrailblazerServiceError {
	fn upstream(kind: DataKind, alias: &str, source: UpstreamError) -> Self {
		match source {
			UpstreamError::ProfileNotFound { .. } => Self::NotFound(alias.to_string()),
			source => Self::Upstream { kind, source },
		}
	}
}

/// Badge listing in the shape of the backend that produced it
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BadgesReturn {
	Graphql(BadgesData),
	/// JSON document returned by the Apex badge action
	Aura(Value),
}

/// Trait for trailblazer lookups - enables mocking the service in API tests
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TrailblazerServiceTrait: Send + Sync {
	/// Profile details; only accepts handles, not user IDs
	async fn profile(&self, alias: &str) -> Result<ProfileReturn, TrailblazerServiceError>;

	async fn rank(&self, alias: &str) -> Result<RankData, TrailblazerServiceError>;

	async fn skills(&self, alias: &str) -> Result<SkillsData, TrailblazerServiceError>;

	async fn certifications(
		&self,
		alias: &str,
	) -> Result<CertificationsReturn, TrailblazerServiceError>;

	async fn badges(
		&self,
		alias: &str,
		request: &BadgeRequest,
	) -> Result<BadgesReturn, TrailblazerServiceError>;
}

#[derive(Debug, Clone)]
pub struct TrailblazerService {
	clients: UpstreamClients,
	backend: Backend,
	aura: AuraSettings,
}

impl TrailblazerService {
	pub fn new(clients: UpstreamClients, settings: &Settings) -> Self {
		Self {
			clients,
			backend: settings.upstream.backend,
			aura: settings.aura.clone(),
		}
	}

	pub fn from_settings(settings: &Settings) -> Result<Self, UpstreamError> {
		Ok(Self::new(UpstreamClients::from_settings(settings)?, settings))
	}

	pub fn backend(&self) -> Backend {
		self.backend
	}

	/// Resolve a handle to the user ID the Apex actions expect
	async fn resolve_user_id(
		&self,
		alias: &str,
		kind: DataKind,
	) -> Result<String, TrailblazerServiceError> {
		if is_user_id(alias) {
			return Ok(alias.to_string());
		}

		debug!("Resolving user ID for handle {}", alias);
		let profile = self
			.clients
			.profile_page
			.fetch_profile(alias)
			.await
			.map_err(|e| TrailblazerServiceError::upstream(kind, alias, e))?;

		profile
			.id
			.filter(|id| !id.is_empty())
			.ok_or_else(|| TrailblazerServiceError::NotFound(alias.to_string()))
	}

	async fn execute_apex(
		&self,
		action: ApexAction,
		kind: DataKind,
		alias: &str,
	) -> Result<AuraAction, TrailblazerServiceError> {
		self.clients
			.aura
			.execute(&action)
			.await
			.map_err(|e| TrailblazerServiceError::upstream(kind, alias, e))
	}

	async fn aura_certifications(
		&self,
		alias: &str,
	) -> Result<CertificationsReturn, TrailblazerServiceError> {
		let kind = DataKind::Certifications;
		let user_id = self.resolve_user_id(alias, kind).await?;
		let action = ApexAction::new(
			&self.aura.certifications_class,
			&self.aura.certifications_method,
			&user_id,
		);

		let result = self.execute_apex(action, kind, alias).await?;
		let certifications = result
			.apex_value()
			.and_then(|v| v.certifications_result.as_ref())
			.map(|r| r.certifications_list.clone())
			.unwrap_or_default();

		Ok(certifications.into_iter().map(Certification::from).collect())
	}

	async fn aura_badges(
		&self,
		alias: &str,
		request: &BadgeRequest,
	) -> Result<BadgesReturn, TrailblazerServiceError> {
		let kind = DataKind::Badges;
		let user_id = self.resolve_user_id(alias, kind).await?;

		let mut action =
			ApexAction::new(&self.aura.badges_class, &self.aura.badges_method, &user_id);
		if let Some(skip) = request.skip {
			action = action.with_skip(skip);
		}
		if let Some(filter) = request.filter {
			action = action.with_filter(filter);
		}

		let result = self.execute_apex(action, kind, alias).await?;
		let body = result
			.apex_value()
			.and_then(|v| v.body.as_deref())
			.ok_or_else(|| TrailblazerServiceError::Upstream {
				kind,
				source: UpstreamError::invalid_response("badge action returned no body"),
			})?;

		parse_embedded_json(body)
			.map(BadgesReturn::Aura)
			.map_err(|source| TrailblazerServiceError::Upstream { kind, source })
	}
}

/// Decode a JSON document that upstream delivered as a string field
pub fn parse_embedded_json(body: &str) -> Result<Value, UpstreamError> {
	serde_json::from_str(body).map_err(|e| UpstreamError::InvalidResponse {
		reason: format!("embedded JSON could not be decoded: {}", e),
	})
}

#[async_trait]
impl TrailblazerServiceTrait for TrailblazerService {
	async fn profile(&self, alias: &str) -> Result<ProfileReturn, TrailblazerServiceError> {
		if is_user_id(alias) {
			return Err(TrailblazerServiceError::HandleRequired(alias.to_string()));
		}

		let profile = self
			.clients
			.profile_page
			.fetch_profile(alias)
			.await
			.map_err(|e| TrailblazerServiceError::upstream(DataKind::Profile, alias, e))?;

		info!("Fetched profile for {}", alias);
		Ok(ProfileReturn::from_profile(profile, alias))
	}

	async fn rank(&self, alias: &str) -> Result<RankData, TrailblazerServiceError> {
		let data: RankData = self
			.clients
			.graphql
			.execute(&queries::rank_request(alias))
			.await
			.map_err(|e| TrailblazerServiceError::upstream(DataKind::Rank, alias, e))?;

		if data.profile.is_none() {
			return Err(TrailblazerServiceError::NotFound(alias.to_string()));
		}
		Ok(data)
	}

	async fn skills(&self, alias: &str) -> Result<SkillsData, TrailblazerServiceError> {
		let data: SkillsData = self
			.clients
			.graphql
			.execute(&queries::skills_request(alias))
			.await
			.map_err(|e| TrailblazerServiceError::upstream(DataKind::Skills, alias, e))?;

		if data.profile.is_none() {
			return Err(TrailblazerServiceError::NotFound(alias.to_string()));
		}
		Ok(data)
	}

	async fn certifications(
		&self,
		alias: &str,
	) -> Result<CertificationsReturn, TrailblazerServiceError> {
		if self.backend == Backend::Aura {
			return self.aura_certifications(alias).await;
		}

		let data: CertificationsData = self
			.clients
			.graphql
			.execute(&queries::certifications_request(alias))
			.await
			.map_err(|e| TrailblazerServiceError::upstream(DataKind::Certifications, alias, e))?;

		let profile = data
			.profile
			.ok_or_else(|| TrailblazerServiceError::NotFound(alias.to_string()))?;

		let certifications: CertificationsReturn = profile
			.credential
			.map(|c| c.certifications)
			.unwrap_or_default()
			.into_iter()
			.map(Certification::from)
			.collect();

		debug!(
			"{} certification(s) for {}",
			certifications.certifications_list.len(),
			alias
		);
		Ok(certifications)
	}

	async fn badges(
		&self,
		alias: &str,
		request: &BadgeRequest,
	) -> Result<BadgesReturn, TrailblazerServiceError> {
		if self.backend == Backend::Aura {
			return self.aura_badges(alias, request).await;
		}

		let data: BadgesData = self
			.clients
			.graphql
			.execute(&queries::badges_request(alias, request))
			.await
			.map_err(|e| TrailblazerServiceError::upstream(DataKind::Badges, alias, e))?;

		if data.profile.is_none() {
			return Err(TrailblazerServiceError::NotFound(alias.to_string()));
		}
		Ok(BadgesReturn::Graphql(data))
	}
}
