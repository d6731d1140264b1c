//! Search and date-bucket filter behavior over realistic family lists

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use test_log::test;

use har_ghar_munga::search::{bucket_count, filter_families, matches_bucket, DateBucket};

use crate::common::test_data;

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 13).unwrap()
}

#[test]
fn test_empty_query_with_all_bucket_returns_base_list() {
    let today = fixed_today();
    let base = test_data::sample_families_for(today);

    let filtered = filter_families(&base, "", DateBucket::All, today);
    let base_ids: Vec<&str> = base.iter().map(|f| f.id.as_str()).collect();
    let filtered_ids: Vec<&str> = filtered.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(filtered_ids, base_ids);
}

#[test]
fn test_query_and_bucket_compose_conjunctively() {
    let today = fixed_today();
    let base = test_data::sample_families_for(today);

    // शिवपुर has one family registered today, one yesterday, one this month
    let today_hits = filter_families(&base, "शिवपुर", DateBucket::Today, today);
    assert_eq!(today_hits.len(), 1);
    assert_eq!(today_hits[0].id, "001");

    let yesterday_hits = filter_families(&base, "शिवपुर", DateBucket::Yesterday, today);
    assert_eq!(yesterday_hits.len(), 1);
    assert_eq!(yesterday_hits[0].id, "004");
}

#[test]
fn test_mobile_number_fragment_matches() {
    let today = fixed_today();
    let base = test_data::sample_families_for(today);

    let hits = filter_families(&base, "543213", DateBucket::All, today);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].child_name, "कविता गुप्ता");
}

#[test]
fn test_chip_counts_come_from_unfiltered_base() {
    let today = fixed_today();
    let base = test_data::sample_families_for(today);

    // Counts stay the same no matter what text query is active
    assert_eq!(bucket_count(&base, DateBucket::All, today), 6);
    assert_eq!(bucket_count(&base, DateBucket::Today, today), 2);
    assert_eq!(bucket_count(&base, DateBucket::Yesterday, today), 2);
    assert_eq!(bucket_count(&base, DateBucket::LastMonth, today), 1);
}

#[test]
fn test_iso_formatted_date_fails_every_dated_bucket() {
    let today = fixed_today();
    let family = test_data::create_test_family("009", "परीक्षण", "शिवपुर", "2025-07-13");

    assert!(matches_bucket(&family, DateBucket::All, today));
    for bucket in [
        DateBucket::Today,
        DateBucket::Yesterday,
        DateBucket::ThisMonth,
        DateBucket::LastMonth,
    ] {
        assert!(!matches_bucket(&family, bucket, today));
    }
}

#[test]
fn test_month_boundary_first_of_month() {
    // On the 1st, yesterday belongs to the previous month
    let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    let family = test_data::create_test_family("010", "परीक्षण", "शिवपुर", "31/07/2025");

    assert!(matches_bucket(&family, DateBucket::Yesterday, today));
    assert!(matches_bucket(&family, DateBucket::LastMonth, today));
    assert!(!matches_bucket(&family, DateBucket::ThisMonth, today));
}
