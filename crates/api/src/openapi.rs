use crate::handlers::{common::ErrorResponse, health, trailblazer};
use utoipa::OpenApi;

use trailhead_types::{Certification, CertificationsReturn, ProfileReturn, ProfileUser, RankData, SkillsData};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        trailblazer::get_profile,
        trailblazer::get_rank,
        trailblazer::get_skills,
        trailblazer::get_certifications,
        trailblazer::get_badges,
    ),
    components(schemas(
        ErrorResponse, health::HealthResponse,
        ProfileReturn, ProfileUser, RankData, SkillsData,
        CertificationsReturn, Certification
    )),
    tags(
        (name = "trailblazer", description = "Trailblazer profile endpoints"),
        (name = "health", description = "Health endpoint")
    )
)]
pub struct ApiDoc;
