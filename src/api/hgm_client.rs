use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::models::{
    Ack, Config, DashboardStats, ExportResponse, Family, FamilyRegistration, LoginResponse,
    PhotoRecord, PhotoUpload, PhotoUploadResponse, PlantOption, ProgressReport, RegisterResponse,
    ReportPeriod,
};
use crate::search::parse_registration_date;

use super::{ApiError, ApiResult, FamilyRepository};

/// Fixed account password sent with every family registration
pub const REGISTRATION_PASSWORD: &str = "hgm@2025";

/// Health status constant sent at registration
const HEALTH_STATUS: &str = "healthy";

/// `/upload/file` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub file_url: String,
}

/// HTTP-backed repository.
///
/// A thin wrapper over reqwest: JSON and multipart requests, one timeout,
/// no retry, no caching, no response validation beyond status and parse.
pub struct HgmApiClient {
    client: Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl HgmApiClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent("har-ghar-munga/0.1")
            .build()?;
        let base_url = Url::parse(&config.api_base_url)?;

        Ok(Self {
            client,
            base_url,
            token: RwLock::new(None),
        })
    }

    /// Store the bearer token returned by `/login`
    pub fn set_token(&self, token: String) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    /// Forget the stored bearer token
    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    /// Probe the backend root, reporting reachability without failing
    pub async fn probe(&self) -> ApiResult<Ack> {
        let response = self.client.get(self.base_url.clone()).send().await?;
        let status = response.status();
        Ok(Ack {
            success: status.is_success(),
            message: format!("Server responded with status: {}", status.as_u16()),
        })
    }

    /// Upload a standalone file (photo or document)
    pub async fn upload_file(&self, path: &Path, kind: &str) -> ApiResult<FileUploadResponse> {
        let bytes = tokio::fs::read(path).await?;
        let form = Form::new()
            .part(
                "file",
                Part::bytes(bytes)
                    .file_name("upload.jpg")
                    .mime_str("image/jpeg")?,
            )
            .text("type", kind.to_string());

        let url = self.endpoint("/upload/file", &[])?;
        let response = self.authed(self.client.post(url)).multipart(form).send().await?;
        Self::decode(response).await
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<Url> {
        let mut url = self.base_url.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().copied());
        }
        Ok(url)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().ok().and_then(|t| t.clone()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        debug!("GET {}", url);
        let response = self.authed(self.client.get(url)).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("request failed with status {}: {}", status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Extract the numeric part of a center code ("AWC-123-DLH" -> "123")
pub fn extract_code_digits(code: &str) -> String {
    code.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reformat a `DD/MM/YYYY` form date to the backend's `YYYY-MM-DD`.
/// Unparseable input is passed through unchanged.
pub fn to_iso_date(raw: &str) -> String {
    match parse_registration_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}

/// Concatenate the address parts into the single authoritative field
pub fn compose_address(registration: &FamilyRegistration) -> String {
    [
        registration.village.as_str(),
        registration.ward.as_str(),
        registration.panchayat.as_str(),
        registration.district.as_str(),
        registration.block.as_str(),
    ]
    .iter()
    .filter(|part| !part.trim().is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ")
}

#[async_trait]
impl FamilyRepository for HgmApiClient {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let url = self.endpoint("/login", &[])?;
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;
        let login: LoginResponse = Self::decode(response).await?;
        if login.success {
            if let Some(token) = &login.token {
                self.set_token(token.clone());
            }
        }
        Ok(login)
    }

    async fn register_family(
        &self,
        registration: &FamilyRegistration,
    ) -> ApiResult<RegisterResponse> {
        let plant_path = registration
            .plant_photo
            .as_ref()
            .ok_or_else(|| ApiError::Validation("पौधे की फोटो आवश्यक है".to_string()))?;
        let pledge_path = registration
            .pledge_photo
            .as_ref()
            .ok_or_else(|| ApiError::Validation("शपथ पत्र की फोटो आवश्यक है".to_string()))?;

        let plant_bytes = tokio::fs::read(plant_path).await?;
        let pledge_bytes = tokio::fs::read(pledge_path).await?;

        let form = Form::new()
            .text("username", registration.mobile_number.to_uppercase())
            .text("name", registration.child_name.clone())
            .text("password", REGISTRATION_PASSWORD)
            .text("guardian_name", registration.father_name.clone())
            .text("father_name", registration.father_name.clone())
            .text("mother_name", registration.mother_name.clone())
            .text("age", registration.age.clone())
            .text("dob", to_iso_date(&registration.date_of_birth))
            .text(
                "aanganwadi_code",
                extract_code_digits(&registration.center_code),
            )
            .text("weight", registration.weight.clone())
            .text("height", registration.height.clone())
            .text("health_status", HEALTH_STATUS)
            .text("address", compose_address(registration))
            .part(
                "plant_photo",
                Part::bytes(plant_bytes)
                    .file_name("plant_photo.jpg")
                    .mime_str("image/jpeg")?,
            )
            .part(
                "pledge_photo",
                Part::bytes(pledge_bytes)
                    .file_name("pledge_photo.jpg")
                    .mime_str("image/jpeg")?,
            );

        let url = self.endpoint("/register", &[])?;
        debug!("POST {} (multipart)", url);
        let response = self.authed(self.client.post(url)).multipart(form).send().await?;
        Self::decode(response).await
    }

    async fn families(&self, center_code: Option<&str>) -> ApiResult<Vec<Family>> {
        let params: Vec<(&str, &str)> = center_code.map(|c| ("centerCode", c)).into_iter().collect();
        let url = self.endpoint("/families", &params)?;
        self.get_json(url).await
    }

    async fn search_families(
        &self,
        query: &str,
        center_code: Option<&str>,
    ) -> ApiResult<Vec<Family>> {
        let mut params: Vec<(&str, &str)> = vec![("q", query)];
        if let Some(code) = center_code {
            params.push(("centerCode", code));
        }
        let url = self.endpoint("/families/search", &params)?;
        self.get_json(url).await
    }

    async fn family_details(&self, family_id: &str) -> ApiResult<Family> {
        let url = self.endpoint(&format!("/families/{}", family_id), &[])?;
        self.get_json(url).await
    }

    async fn family_by_user(&self, user_id: &str) -> ApiResult<Family> {
        let url = self.endpoint(&format!("/families/user/{}", user_id), &[])?;
        self.get_json(url).await
    }

    async fn update_family(&self, family_id: &str, update: &serde_json::Value) -> ApiResult<Ack> {
        let url = self.endpoint(&format!("/families/{}", family_id), &[])?;
        debug!("PUT {}", url);
        let response = self.authed(self.client.put(url)).json(update).send().await?;
        Self::decode(response).await
    }

    async fn upload_photo(&self, photo: &PhotoUpload) -> ApiResult<PhotoUploadResponse> {
        let url = self.endpoint("/photos/upload", &[])?;
        debug!("POST {}", url);
        let response = self.authed(self.client.post(url)).json(photo).send().await?;
        Self::decode(response).await
    }

    async fn family_photos(&self, family_id: &str) -> ApiResult<Vec<PhotoRecord>> {
        let url = self.endpoint(&format!("/photos/family/{}", family_id), &[])?;
        self.get_json(url).await
    }

    async fn total_images(&self) -> ApiResult<u32> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct TotalImages {
            total_images: u32,
        }
        let url = self.endpoint("/photos/total", &[])?;
        let total: TotalImages = self.get_json(url).await?;
        Ok(total.total_images)
    }

    async fn progress_report(
        &self,
        period: ReportPeriod,
        center_code: Option<&str>,
    ) -> ApiResult<ProgressReport> {
        let mut params: Vec<(&str, &str)> = vec![("period", period.as_str())];
        if let Some(code) = center_code {
            params.push(("centerCode", code));
        }
        let url = self.endpoint("/reports/progress", &params)?;
        self.get_json(url).await
    }

    async fn export_report(
        &self,
        period: ReportPeriod,
        center_code: Option<&str>,
    ) -> ApiResult<ExportResponse> {
        let mut params: Vec<(&str, &str)> = vec![("period", period.as_str())];
        if let Some(code) = center_code {
            params.push(("centerCode", code));
        }
        let url = self.endpoint("/reports/export", &params)?;
        self.get_json(url).await
    }

    async fn dashboard_stats(&self, center_code: Option<&str>) -> ApiResult<DashboardStats> {
        let params: Vec<(&str, &str)> = center_code.map(|c| ("centerCode", c)).into_iter().collect();
        let url = self.endpoint("/dashboard/stats", &params)?;
        self.get_json(url).await
    }

    async fn plant_options(&self) -> ApiResult<Vec<PlantOption>> {
        let url = self.endpoint("/plants/options", &[])?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_code_digits() {
        assert_eq!(extract_code_digits("AWC-123-DLH"), "123");
        assert_eq!(extract_code_digits("ADMIN-001"), "001");
        assert_eq!(extract_code_digits("no-digits"), "");
    }

    #[test]
    fn test_to_iso_date() {
        assert_eq!(to_iso_date("13/07/2025"), "2025-07-13");
        assert_eq!(to_iso_date("05/01/2024"), "2024-01-05");
        // Unparseable input passes through unchanged
        assert_eq!(to_iso_date("garbage"), "garbage");
    }

    #[test]
    fn test_compose_address_skips_empty_parts() {
        let registration = FamilyRegistration {
            village: "शिवपुर".to_string(),
            ward: "वार्ड 3".to_string(),
            panchayat: String::new(),
            district: "मथुरा".to_string(),
            block: "मथुरा".to_string(),
            ..Default::default()
        };
        assert_eq!(compose_address(&registration), "शिवपुर, वार्ड 3, मथुरा, मथुरा");
    }
}
