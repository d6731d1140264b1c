use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Ack, DashboardStats, ExportResponse, Family, FamilyRegistration, LoginResponse, PhotoRecord,
    PhotoUpload, PhotoUploadResponse, PlantOption, ProgressReport, RegisterResponse, ReportPeriod,
};

pub mod fixture;
pub mod hgm_client;

pub use fixture::FixtureRepository;
pub use hgm_client::HgmApiClient;

/// Errors surfaced by the repository implementations.
///
/// No retry policy anywhere: every failure is terminal for the current user
/// action and the caller decides how to present it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}, message: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Credentials(#[from] crate::demo::CredentialError),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("परिवार नहीं मिला: {0}")]
    NotFound(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Data-source seam for everything the screens need.
///
/// Two implementations: `FixtureRepository` (in-memory demo data) and
/// `HgmApiClient` (HTTP backend), selected by configuration.
#[async_trait]
pub trait FamilyRepository: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;

    async fn register_family(
        &self,
        registration: &FamilyRegistration,
    ) -> ApiResult<RegisterResponse>;

    async fn families(&self, center_code: Option<&str>) -> ApiResult<Vec<Family>>;

    async fn search_families(
        &self,
        query: &str,
        center_code: Option<&str>,
    ) -> ApiResult<Vec<Family>>;

    async fn family_details(&self, family_id: &str) -> ApiResult<Family>;

    async fn family_by_user(&self, user_id: &str) -> ApiResult<Family>;

    async fn update_family(&self, family_id: &str, update: &serde_json::Value) -> ApiResult<Ack>;

    async fn upload_photo(&self, photo: &PhotoUpload) -> ApiResult<PhotoUploadResponse>;

    async fn family_photos(&self, family_id: &str) -> ApiResult<Vec<PhotoRecord>>;

    async fn total_images(&self) -> ApiResult<u32>;

    async fn progress_report(
        &self,
        period: ReportPeriod,
        center_code: Option<&str>,
    ) -> ApiResult<ProgressReport>;

    async fn export_report(
        &self,
        period: ReportPeriod,
        center_code: Option<&str>,
    ) -> ApiResult<ExportResponse>;

    async fn dashboard_stats(&self, center_code: Option<&str>) -> ApiResult<DashboardStats>;

    async fn plant_options(&self) -> ApiResult<Vec<PlantOption>>;
}
