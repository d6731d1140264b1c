use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tokio::sync::Mutex;
use tracing::debug;

use crate::demo;
use crate::models::{
    Ack, DashboardStats, ExportResponse, Family, FamilyRegistration, FamilyStatus, LoginResponse,
    PhotoRecord, PhotoUpload, PhotoUploadResponse, PlantOption, ProgressReport, RegisterResponse,
    ReportPeriod,
};
use crate::search::{filter_families, DateBucket};

use super::{ApiError, ApiResult, FamilyRepository};

/// In-memory repository backed by the demo fixture data.
///
/// Stands in for the backend when demo mode is enabled. Uploads mutate the
/// stored photo counts, so a refetch after an optimistic local increment
/// returns the authoritative value.
pub struct FixtureRepository {
    today: NaiveDate,
    families: Mutex<Vec<Family>>,
    photos: Mutex<Vec<PhotoRecord>>,
    total_uploads: Mutex<u32>,
}

impl FixtureRepository {
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Seed with a fixed current day (used by tests)
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            today,
            families: Mutex::new(demo::sample_families(today)),
            photos: Mutex::new(Vec::new()),
            total_uploads: Mutex::new(1245),
        }
    }
}

impl Default for FixtureRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FamilyRepository for FixtureRepository {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let user = demo::validate_demo_credentials(username, password)?;
        debug!("demo login for {}", user.username);
        Ok(LoginResponse {
            success: true,
            message: "लॉगिन सफल".to_string(),
            user: Some(user),
            token: None,
        })
    }

    async fn register_family(
        &self,
        registration: &FamilyRegistration,
    ) -> ApiResult<RegisterResponse> {
        if registration.plant_photo.is_none() {
            return Err(ApiError::Validation("पौधे की फोटो आवश्यक है".to_string()));
        }
        if registration.pledge_photo.is_none() {
            return Err(ApiError::Validation("शपथ पत्र की फोटो आवश्यक है".to_string()));
        }

        let mut families = self.families.lock().await;
        let id = format!("{:03}", families.len() + 1);
        let registration_date = if registration.registration_date.trim().is_empty() {
            self.today.format("%d/%m/%Y").to_string()
        } else {
            registration.registration_date.clone()
        };
        families.push(Family {
            id: id.clone(),
            child_name: registration.child_name.clone(),
            parent_name: registration.father_name.clone(),
            mobile_number: registration.mobile_number.clone(),
            village: registration.village.clone(),
            registration_date,
            plant_distributed: true,
            center_code: registration.center_code.clone(),
            center_name: registration.center_name.clone(),
            worker_name: registration.worker_name.clone(),
            status: FamilyStatus::Active,
            total_images_yet: Some(0),
            plant_photo: None,
            pledge_photo: None,
            mother_name: Some(registration.mother_name.clone()),
            father_name: Some(registration.father_name.clone()),
            anganwadi_code: None,
        });

        Ok(RegisterResponse {
            success: true,
            message: "बच्चे का पंजीकरण सफलतापूर्वक हो गया".to_string(),
            family_id: Some(id),
        })
    }

    async fn families(&self, center_code: Option<&str>) -> ApiResult<Vec<Family>> {
        let families = self.families.lock().await;
        Ok(families
            .iter()
            .filter(|f| center_code.map_or(true, |c| f.center_code == c))
            .cloned()
            .collect())
    }

    async fn search_families(
        &self,
        query: &str,
        center_code: Option<&str>,
    ) -> ApiResult<Vec<Family>> {
        let base = self.families(center_code).await?;
        Ok(filter_families(&base, query, DateBucket::All, self.today))
    }

    async fn family_details(&self, family_id: &str) -> ApiResult<Family> {
        let families = self.families.lock().await;
        families
            .iter()
            .find(|f| f.id == family_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(family_id.to_string()))
    }

    async fn family_by_user(&self, user_id: &str) -> ApiResult<Family> {
        // The demo family account maps to the first sample record
        let family_id = if user_id == "demo-family" { "001" } else { user_id };
        self.family_details(family_id).await
    }

    async fn update_family(&self, family_id: &str, update: &serde_json::Value) -> ApiResult<Ack> {
        let mut families = self.families.lock().await;
        let family = families
            .iter_mut()
            .find(|f| f.id == family_id)
            .ok_or_else(|| ApiError::NotFound(family_id.to_string()))?;

        if let Some(distributed) = update.get("plantDistributed").and_then(|v| v.as_bool()) {
            family.plant_distributed = distributed;
        }
        Ok(Ack {
            success: true,
            message: "अपडेट सफल".to_string(),
        })
    }

    async fn upload_photo(&self, photo: &PhotoUpload) -> ApiResult<PhotoUploadResponse> {
        let mut families = self.families.lock().await;
        let family = families
            .iter_mut()
            .find(|f| f.id == photo.family_id)
            .ok_or_else(|| ApiError::NotFound(photo.family_id.clone()))?;
        family.total_images_yet = Some(family.total_images_yet.unwrap_or(0) + 1);

        let mut total = self.total_uploads.lock().await;
        *total += 1;

        let mut photos = self.photos.lock().await;
        let record = PhotoRecord {
            id: format!("photo-{}", *total),
            photo_uri: photo.photo_uri.clone(),
            plant_stage: photo.plant_stage.clone(),
            description: photo.description.clone(),
            upload_date: self.today.format("%d/%m/%Y").to_string(),
        };
        let photo_id = record.id.clone();
        photos.push(record);

        Ok(PhotoUploadResponse {
            success: true,
            message: "फोटो सफलतापूर्वक अपलोड हो गया है!".to_string(),
            photo_id: Some(photo_id),
        })
    }

    async fn family_photos(&self, _family_id: &str) -> ApiResult<Vec<PhotoRecord>> {
        Ok(self.photos.lock().await.clone())
    }

    async fn total_images(&self) -> ApiResult<u32> {
        Ok(*self.total_uploads.lock().await)
    }

    async fn progress_report(
        &self,
        period: ReportPeriod,
        _center_code: Option<&str>,
    ) -> ApiResult<ProgressReport> {
        Ok(demo::progress_report(period))
    }

    async fn export_report(
        &self,
        period: ReportPeriod,
        _center_code: Option<&str>,
    ) -> ApiResult<ExportResponse> {
        Ok(ExportResponse {
            success: true,
            message: "रिपोर्ट तैयार है".to_string(),
            download_url: format!("/reports/export/hgm-{}.pdf", period.as_str()),
        })
    }

    async fn dashboard_stats(&self, _center_code: Option<&str>) -> ApiResult<DashboardStats> {
        Ok(demo::dashboard_stats())
    }

    async fn plant_options(&self) -> ApiResult<Vec<PlantOption>> {
        Ok(demo::plant_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_repo() -> FixtureRepository {
        FixtureRepository::with_today(NaiveDate::from_ymd_opt(2025, 7, 13).unwrap())
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let repo = fixed_repo();
        let response = repo.login("cgpv001", demo::DEMO_PASSWORD).await.unwrap();
        assert!(response.success);
        assert_eq!(response.user.unwrap().name, "राम कुमार");

        let err = repo.login("cgpv001", "nope").await.unwrap_err();
        assert!(matches!(err, ApiError::Credentials(_)));
    }

    #[tokio::test]
    async fn test_upload_is_visible_to_next_fetch() {
        let repo = fixed_repo();
        let before = repo.family_details("001").await.unwrap();
        assert_eq!(before.total_images_yet, Some(4));

        let upload = PhotoUpload {
            family_id: "001".to_string(),
            plant_stage: "growing".to_string(),
            description: None,
            photo_uri: "file:///tmp/p.jpg".to_string(),
        };
        let response = repo.upload_photo(&upload).await.unwrap();
        assert!(response.success);

        let after = repo.family_details("001").await.unwrap();
        assert_eq!(after.total_images_yet, Some(5));
        assert_eq!(repo.total_images().await.unwrap(), 1246);
    }

    #[tokio::test]
    async fn test_search_delegates_to_filter() {
        let repo = fixed_repo();
        let hits = repo.search_families("शिवपुर", None).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|f| f.village == "शिवपुर"));
        // Base order preserved
        let ids: Vec<&str> = hits.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["001", "004", "006"]);
    }

    #[tokio::test]
    async fn test_update_toggles_plant_distributed() {
        let repo = fixed_repo();
        assert!(!repo.family_details("002").await.unwrap().plant_distributed);

        let ack = repo
            .update_family("002", &serde_json::json!({ "plantDistributed": true }))
            .await
            .unwrap();
        assert!(ack.success);
        assert!(repo.family_details("002").await.unwrap().plant_distributed);
    }

    #[tokio::test]
    async fn test_plant_options_lists_ten_varieties() {
        let repo = fixed_repo();
        let options = repo.plant_options().await.unwrap();
        assert_eq!(options.len(), 10);
        assert_eq!(options[0].hindi_name, "मुंगा 1");
    }

    #[tokio::test]
    async fn test_registration_requires_both_photos() {
        let repo = fixed_repo();
        let registration = FamilyRegistration {
            child_name: "परीक्षण".to_string(),
            plant_photo: Some("/tmp/plant.jpg".into()),
            pledge_photo: None,
            ..Default::default()
        };
        let err = repo.register_family(&registration).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
