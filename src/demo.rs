//! Demo credentials and fixture datasets.
//!
//! The gate is validated entirely client-side and exists for testing and
//! field demos only; it is not an authentication mechanism.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::models::{
    Activity, ActivityKind, DashboardStats, Family, FamilyStatus, PlantOption, ProgressReport,
    ReportPeriod, SessionUser, UserRole,
};

/// Shared demo password for all roles
pub const DEMO_PASSWORD: &str = "hgm@2025";

/// Demo credential validation failure, with the user-facing Hindi message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("गलत पासवर्ड!")]
    WrongPassword,
    #[error("गलत उपयोगकर्ता नाम!")]
    UnknownUser,
}

/// Per-role demo user table
pub fn demo_users() -> Vec<SessionUser> {
    vec![
        SessionUser {
            id: Some("demo-admin".to_string()),
            username: "CGCO001".to_string(),
            role: Some(UserRole::Admin),
            name: "प्रशासक".to_string(),
            center_code: "ADMIN-001".to_string(),
            center_name: "मुख्य कार्यालय".to_string(),
            district: "मथुरा".to_string(),
            block: "मथुरा".to_string(),
        },
        SessionUser {
            id: Some("demo-anganwadi".to_string()),
            username: "CGAB001".to_string(),
            role: Some(UserRole::Anganwadi),
            name: "श्रीमती सुनीता देवी".to_string(),
            center_code: "AWC-123-DLH".to_string(),
            center_name: "सरस्वती आंगनबाड़ी केंद्र".to_string(),
            district: "मथुरा".to_string(),
            block: "मथुरा".to_string(),
        },
        SessionUser {
            id: Some("demo-family".to_string()),
            username: "CGPV001".to_string(),
            role: Some(UserRole::Family),
            name: "राम कुमार".to_string(),
            center_code: "AWC-123-DLH".to_string(),
            center_name: "सरस्वती आंगनबाड़ी केंद्र".to_string(),
            district: "मथुरा".to_string(),
            block: "मथुरा".to_string(),
        },
    ]
}

/// Look up a demo user by username, compared after uppercasing
pub fn find_demo_user(username: &str) -> Option<SessionUser> {
    let upper = username.to_uppercase();
    demo_users().into_iter().find(|u| u.username == upper)
}

/// Validate demo credentials: password first, then the username table
pub fn validate_demo_credentials(
    username: &str,
    password: &str,
) -> Result<SessionUser, CredentialError> {
    if password != DEMO_PASSWORD {
        return Err(CredentialError::WrongPassword);
    }
    find_demo_user(username).ok_or(CredentialError::UnknownUser)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn previous_month(today: NaiveDate) -> (i32, u32) {
    if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    }
}

/// The six sample families used by the search screen and fixture backend.
///
/// Registration dates are generated relative to `today` so the date-bucket
/// chips always have something to show: two today, two yesterday, one in the
/// prior month and one earlier in the current month.
pub fn sample_families(today: NaiveDate) -> Vec<Family> {
    let yesterday = today.pred_opt().unwrap_or(today);
    let (prev_year, prev_month) = previous_month(today);
    let last_month = NaiveDate::from_ymd_opt(prev_year, prev_month, 15).unwrap_or(today);
    let this_month = NaiveDate::from_ymd_opt(today.year(), today.month(), 5).unwrap_or(today);

    let rows = [
        ("001", "राहुल कुमार", "सुनील कुमार", "9876543210", "शिवपुर", today, true),
        ("002", "प्रिया शर्मा", "राजेश शर्मा", "9876543211", "रामपुर", today, false),
        ("003", "अनिल सिंह", "सीता देवी", "9876543212", "गोकुलपुर", yesterday, false),
        ("004", "कविता गुप्ता", "अशोक गुप्ता", "9876543213", "शिवपुर", yesterday, true),
        ("005", "विकास यादव", "राम यादव", "9876543214", "नंदपुर", last_month, false),
        ("006", "सुनीता कुमारी", "रविंद्र कुमार", "9876543215", "शिवपुर", this_month, true),
    ];

    rows.iter()
        .map(
            |(id, child, parent, mobile, village, date, distributed)| Family {
                id: id.to_string(),
                child_name: child.to_string(),
                parent_name: parent.to_string(),
                mobile_number: mobile.to_string(),
                village: village.to_string(),
                registration_date: format_date(*date),
                plant_distributed: *distributed,
                center_code: "AWC-123-DLH".to_string(),
                center_name: "सरस्वती आंगनबाड़ी केंद्र".to_string(),
                worker_name: "श्रीमती सुनीता देवी".to_string(),
                status: FamilyStatus::Active,
                total_images_yet: Some(4),
                plant_photo: None,
                pledge_photo: None,
                mother_name: None,
                father_name: None,
                anganwadi_code: Some("123".to_string()),
            },
        )
        .collect()
}

/// Fixture dashboard statistics
pub fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_families: 156,
        distributed_plants: 128,
        active_families: 142,
        success_rate: 98,
        recent_activities: vec![
            Activity {
                date: "15 जुलाई 2025".to_string(),
                activity: "राम परिवार को मुंगा के पौधे दिए गए".to_string(),
                kind: ActivityKind::Distribution,
            },
            Activity {
                date: "14 जुलाई 2025".to_string(),
                activity: "श्याम परिवार द्वारा फोटो अपलोड की गई".to_string(),
                kind: ActivityKind::PhotoUpload,
            },
            Activity {
                date: "13 जुलाई 2025".to_string(),
                activity: "गीता परिवार को नए पौधे दिए गए".to_string(),
                kind: ActivityKind::Distribution,
            },
        ],
    }
}

/// Fixture progress report for the given period
pub fn progress_report(period: ReportPeriod) -> ProgressReport {
    let (total_families, distributed_plants, success_rate, new_added) = match period {
        ReportPeriod::Week => (28, 35, 95, 12),
        ReportPeriod::Month => (156, 128, 98, 45),
        ReportPeriod::Year => (890, 756, 99, 245),
    };

    let mut activities = vec![
        Activity {
            date: "15 जुलाई 2025".to_string(),
            activity: "राम परिवार को पौधा वितरित".to_string(),
            kind: ActivityKind::Distribution,
        },
        Activity {
            date: "14 जुलाई 2025".to_string(),
            activity: "सीता देवी ने फोटो अपलोड किया".to_string(),
            kind: ActivityKind::PhotoUpload,
        },
        Activity {
            date: "13 जुलाई 2025".to_string(),
            activity: "नया परिवार पंजीकृत".to_string(),
            kind: ActivityKind::Registration,
        },
    ];
    if period == ReportPeriod::Month {
        activities.push(Activity {
            date: "12 जुलाई 2025".to_string(),
            activity: "अनिल परिवार का पंजीकरण हुआ".to_string(),
            kind: ActivityKind::Registration,
        });
        activities.push(Activity {
            date: "11 जुलाई 2025".to_string(),
            activity: "सुनीता परिवार ने प्रगति फोटो भेजी".to_string(),
            kind: ActivityKind::PhotoUpload,
        });
    }

    ProgressReport {
        period,
        total_families,
        distributed_plants,
        success_rate,
        new_added,
        activities,
    }
}

/// The ten moringa variety options
pub fn plant_options() -> Vec<PlantOption> {
    (1..=10)
        .map(|i| PlantOption {
            id: i,
            name: format!("Munga {}", i),
            hindi_name: format!("मुंगा {}", i),
            emoji: "🌱".to_string(),
            description: format!("मुंगा किस्म {}", i),
        })
        .collect()
}
