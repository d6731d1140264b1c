//! HTTP client behavior against a wiremock backend: endpoint shapes,
//! auth token handling, multipart registration and error mapping.

use pretty_assertions::assert_eq;
use serde_json::json;
use test_log::test;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use har_ghar_munga::api::{ApiError, FamilyRepository, HgmApiClient};
use har_ghar_munga::models::{Config, FamilyRegistration, ReportPeriod};

fn client_for(server: &MockServer) -> HgmApiClient {
    let config = Config {
        api_base_url: server.uri(),
        demo_mode: false,
        request_timeout_secs: 5,
    };
    HgmApiClient::new(&config).unwrap()
}

fn family_json(id: &str, child_name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "childName": child_name,
        "parentName": "सुनील कुमार",
        "mobileNumber": "9876543210",
        "village": "शिवपुर",
        "registrationDate": "13/07/2025",
        "plantDistributed": true
    })
}

/// Write a throwaway JPEG stand-in and return its path
fn temp_photo(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("hgm-test-{}-{}", std::process::id(), name));
    std::fs::write(&path, b"\xff\xd8\xff\xe0 not a real jpeg").unwrap();
    path
}

#[test(tokio::test)]
async fn test_probe_reports_server_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ack = client.probe().await.unwrap();
    assert!(ack.success);
    assert_eq!(ack.message, "Server responded with status: 200");
}

#[test(tokio::test)]
async fn test_login_stores_bearer_token_for_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "लॉगिन सफल",
            "user": { "username": "CGAB001", "role": "anganwadi", "name": "सुनीता देवी" },
            "token": "tok-123"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/families"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([family_json("001", "राहुल कुमार")])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let login = client.login("CGAB001", "hgm@2025").await.unwrap();
    assert!(login.success);

    // The stored token rides along on the next request
    let families = client.families(None).await.unwrap();
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].child_name, "राहुल कुमार");
}

#[test(tokio::test)]
async fn test_families_passes_center_code_as_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/families"))
        .and(query_param("centerCode", "AWC-123-DLH"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([family_json("001", "राहुल कुमार")])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let families = client.families(Some("AWC-123-DLH")).await.unwrap();
    assert_eq!(families.len(), 1);
}

#[test(tokio::test)]
async fn test_search_sends_query_and_center() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/families/search"))
        .and(query_param("q", "शिवपुर"))
        .and(query_param("centerCode", "AWC-123-DLH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let hits = client
        .search_families("शिवपुर", Some("AWC-123-DLH"))
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[test(tokio::test)]
async fn test_registration_multipart_carries_derived_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "पंजीकरण सफल",
            "familyId": "007"
        })))
        .mount(&server)
        .await;

    let plant = temp_photo("plant.jpg");
    let pledge = temp_photo("pledge.jpg");
    let registration = FamilyRegistration {
        child_name: "राहुल कुमार".to_string(),
        date_of_birth: "01/06/2015".to_string(),
        age: "10".to_string(),
        weight: "22".to_string(),
        height: "120".to_string(),
        mother_name: "गीता देवी".to_string(),
        father_name: "सुनील कुमार".to_string(),
        mobile_number: "9876543210".to_string(),
        village: "शिवपुर".to_string(),
        ward: "वार्ड 3".to_string(),
        panchayat: "शिवपुर पंचायत".to_string(),
        district: "मथुरा".to_string(),
        block: "मथुरा".to_string(),
        center_code: "AWC-123-DLH".to_string(),
        plant_photo: Some(plant.clone()),
        pledge_photo: Some(pledge.clone()),
        ..Default::default()
    };

    let client = client_for(&server);
    let response = client.register_family(&registration).await.unwrap();
    assert!(response.success);
    assert_eq!(response.family_id.as_deref(), Some("007"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);

    // Derived fields: ISO dob, digits-only center code, composed address,
    // constant password and health status.
    assert!(body.contains("2015-06-01"));
    assert!(body.contains("name=\"aanganwadi_code\""));
    assert!(body.contains("\r\n123\r\n"));
    assert!(body.contains("hgm@2025"));
    assert!(body.contains("healthy"));
    assert!(body.contains("शिवपुर, वार्ड 3, शिवपुर पंचायत, मथुरा, मथुरा"));
    assert!(body.contains("filename=\"plant_photo.jpg\""));
    assert!(body.contains("filename=\"pledge_photo.jpg\""));

    std::fs::remove_file(plant).ok();
    std::fs::remove_file(pledge).ok();
}

#[test(tokio::test)]
async fn test_registration_without_photos_never_hits_the_wire() {
    let server = MockServer::start().await;

    let client = client_for(&server);
    let registration = FamilyRegistration {
        child_name: "परीक्षण".to_string(),
        ..Default::default()
    };
    let err = client.register_family(&registration).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[test(tokio::test)]
async fn test_non_success_status_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/families"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.families(None).await.unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        client.families(None).await.unwrap_err().to_string(),
        "HTTP error! status: 500, message: boom"
    );
}

#[test(tokio::test)]
async fn test_progress_report_and_export_share_period_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/progress"))
        .and(query_param("period", "month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "period": "month",
            "totalFamilies": 156,
            "distributedPlants": 128,
            "successRate": 98,
            "newAdded": 45
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/export"))
        .and(query_param("period", "month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "downloadUrl": "/reports/export/hgm-month.pdf"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = client
        .progress_report(ReportPeriod::Month, None)
        .await
        .unwrap();
    assert_eq!(report.total_families, 156);
    assert_eq!(report.new_added, 45);

    let export = client.export_report(ReportPeriod::Month, None).await.unwrap();
    assert_eq!(export.download_url, "/reports/export/hgm-month.pdf");
}

#[test(tokio::test)]
async fn test_plant_options_and_total_images() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plants/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Munga 1",
            "hindiName": "मुंगा 1",
            "emoji": "🌱",
            "description": "मुंगा किस्म 1"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photos/total"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalImages": 1245 })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = client.plant_options().await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].hindi_name, "मुंगा 1");

    assert_eq!(client.total_images().await.unwrap(), 1245);
}

#[test(tokio::test)]
async fn test_standalone_file_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "fileUrl": "/uploads/abc.jpg"
        })))
        .mount(&server)
        .await;

    let photo = temp_photo("standalone.jpg");
    let client = client_for(&server);
    let response = client.upload_file(&photo, "plant_progress").await.unwrap();
    assert!(response.success);
    assert_eq!(response.file_url, "/uploads/abc.jpg");

    std::fs::remove_file(photo).ok();
}
