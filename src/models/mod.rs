use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User role as understood by the backend and the demo gate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Anganwadi,
    Family,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Anganwadi => "anganwadi",
            UserRole::Family => "family",
        }
    }
}

/// Family activity status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FamilyStatus {
    Active,
    Inactive,
}

impl Default for FamilyStatus {
    fn default() -> Self {
        FamilyStatus::Active
    }
}

/// A registered family record.
///
/// `registration_date` is kept as the raw `DD/MM/YYYY` string the backend
/// stores; parsing happens only inside the search/filter code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    pub child_name: String,
    pub parent_name: String,
    pub mobile_number: String,
    pub village: String,
    pub registration_date: String,
    pub plant_distributed: bool,
    #[serde(default)]
    pub center_code: String,
    #[serde(default)]
    pub center_name: String,
    #[serde(default)]
    pub worker_name: String,
    #[serde(default)]
    pub status: FamilyStatus,
    #[serde(default)]
    pub total_images_yet: Option<u32>,
    #[serde(default, rename = "plant_photo")]
    pub plant_photo: Option<String>,
    #[serde(default, rename = "pledge_photo")]
    pub pledge_photo: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub anganwadi_code: Option<String>,
}

/// Registration form data collected by the add-family screen.
///
/// Address parts are form state only; the wire format sends a single
/// concatenated `address` field (see `HgmApiClient::register_family`).
#[derive(Debug, Clone, Default)]
pub struct FamilyRegistration {
    // Child information
    pub child_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub age: String,
    pub weight: String,
    pub height: String,

    // Parent information
    pub mother_name: String,
    pub father_name: String,
    pub mobile_number: String,
    pub village: String,
    pub ward: String,
    pub panchayat: String,
    pub district: String,

    // Plant information
    pub distribution_date: String,

    // Center information
    pub center_name: String,
    pub center_code: String,
    pub worker_name: String,
    pub worker_code: String,
    pub block: String,
    pub registration_date: String,

    // Required photo proofs
    pub plant_photo: Option<PathBuf>,
    pub pledge_photo: Option<PathBuf>,
}

/// Logged-in user as returned by `/login` (all fields optional on the wire)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub center_code: String,
    #[serde(default)]
    pub center_name: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub block: String,
}

/// `/login` response shape
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Generic success/message acknowledgement used by several endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// `/register` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub family_id: Option<String>,
}

/// `/photos/upload` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub photo_id: Option<String>,
}

/// `/reports/export` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub download_url: String,
}

/// Photo upload request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUpload {
    pub family_id: String,
    pub plant_stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub photo_uri: String,
}

/// A previously uploaded photo, as listed by `/photos/family/:id`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: String,
    pub photo_uri: String,
    pub plant_stage: String,
    #[serde(default)]
    pub description: Option<String>,
    pub upload_date: String,
}

/// Activity kind for dashboard and report entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Registration,
    Distribution,
    PhotoUpload,
    ProgressUpdate,
}

/// One entry in the recent-activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub date: String,
    pub activity: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

/// Dashboard statistics for admin and center views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_families: u32,
    pub distributed_plants: u32,
    pub active_families: u32,
    pub success_rate: u32,
    #[serde(default)]
    pub recent_activities: Vec<Activity>,
}

/// Reporting period for progress reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Week,
    Month,
    Year,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Year => "year",
        }
    }
}

/// Aggregated progress report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub period: ReportPeriod,
    pub total_families: u32,
    pub distributed_plants: u32,
    pub success_rate: u32,
    pub new_added: u32,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Moringa variety option offered at registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantOption {
    pub id: u32,
    pub name: String,
    pub hindi_name: String,
    pub emoji: String,
    pub description: String,
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub demo_mode: bool,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            api_base_url: std::env::var("HGM_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5001".to_string()),
            demo_mode: std::env::var("HGM_DEMO_MODE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            request_timeout_secs: std::env::var("HGM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }
}
