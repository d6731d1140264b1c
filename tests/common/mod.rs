//! Common test utilities and helpers

/// Test data utilities
pub mod test_data {
    use har_ghar_munga::models::{Family, FamilyStatus};

    /// Create a test family with the given identity fields
    pub fn create_test_family(
        id: &str,
        child_name: &str,
        village: &str,
        registration_date: &str,
    ) -> Family {
        Family {
            id: id.to_string(),
            child_name: child_name.to_string(),
            parent_name: "सुनील कुमार".to_string(),
            mobile_number: "9876543210".to_string(),
            village: village.to_string(),
            registration_date: registration_date.to_string(),
            plant_distributed: true,
            center_code: "AWC-123-DLH".to_string(),
            center_name: "सरस्वती आंगनबाड़ी केंद्र".to_string(),
            worker_name: "श्रीमती सुनीता देवी".to_string(),
            status: FamilyStatus::Active,
            total_images_yet: Some(0),
            plant_photo: None,
            pledge_photo: None,
            mother_name: None,
            father_name: None,
            anganwadi_code: Some("123".to_string()),
        }
    }

    /// The six-record list used by most filter tests: two registered today,
    /// two yesterday, one last month, one earlier this month.
    pub fn sample_families_for(today: chrono::NaiveDate) -> Vec<Family> {
        har_ghar_munga::demo::sample_families(today)
    }
}

/// Logging utilities for tests
pub mod logging {
    use std::sync::Once;
    use tracing::info;

    static INIT: Once = Once::new();

    /// Initialize test logging
    pub fn init_test_logging() {
        INIT.call_once(|| {
            let _ = tracing::subscriber::set_global_default(
                tracing_subscriber::fmt()
                    .with_env_filter("har_ghar_munga=debug,test=debug")
                    .with_test_writer()
                    .finish(),
            );
        });
    }

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }
}
