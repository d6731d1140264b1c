use chrono::{Datelike, NaiveDate};

use crate::models::Family;

/// Date-range buckets for the family search filter chips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    All,
    Today,
    Yesterday,
    ThisMonth,
    LastMonth,
}

impl DateBucket {
    /// Chip order as shown on the search screen
    pub const CHIPS: [DateBucket; 5] = [
        DateBucket::All,
        DateBucket::Today,
        DateBucket::Yesterday,
        DateBucket::ThisMonth,
        DateBucket::LastMonth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateBucket::All => "सभी",
            DateBucket::Today => "आज",
            DateBucket::Yesterday => "कल",
            DateBucket::ThisMonth => "इस महीने",
            DateBucket::LastMonth => "पिछले महीने",
        }
    }
}

/// Parse a `DD/MM/YYYY` registration date string.
///
/// Anything that does not split into exactly three numeric parts forming a
/// valid calendar date yields `None`; such records fail every date bucket
/// except `All`. No locale-aware parsing.
pub fn parse_registration_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Check whether a family's registration date falls in the given bucket,
/// relative to the supplied current day.
pub fn matches_bucket(family: &Family, bucket: DateBucket, today: NaiveDate) -> bool {
    if bucket == DateBucket::All {
        return true;
    }
    let Some(date) = parse_registration_date(&family.registration_date) else {
        return false;
    };
    match bucket {
        DateBucket::All => true,
        DateBucket::Today => date == today,
        DateBucket::Yesterday => today.pred_opt().map_or(false, |y| date == y),
        DateBucket::ThisMonth => date.month() == today.month() && date.year() == today.year(),
        DateBucket::LastMonth => {
            // Day 1 of the prior month; January rolls to December of the
            // previous year.
            let (year, month) = if today.month() == 1 {
                (today.year() - 1, 12)
            } else {
                (today.year(), today.month() - 1)
            };
            date.month() == month && date.year() == year
        }
    }
}

/// Check whether a family matches a free-text query.
///
/// Contains semantics, case-insensitive, over child name, parent name,
/// mobile number and village. An empty or whitespace-only query matches all.
pub fn matches_query(family: &Family, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    family.child_name.to_lowercase().contains(&needle)
        || family.parent_name.to_lowercase().contains(&needle)
        || family.mobile_number.contains(&needle)
        || family.village.to_lowercase().contains(&needle)
}

/// Apply the text query and date bucket conjunctively, preserving the input
/// order. Recomputed from the base list on every keystroke or chip change;
/// no memoization.
pub fn filter_families(
    families: &[Family],
    query: &str,
    bucket: DateBucket,
    today: NaiveDate,
) -> Vec<Family> {
    families
        .iter()
        .filter(|f| matches_query(f, query))
        .filter(|f| matches_bucket(f, bucket, today))
        .cloned()
        .collect()
}

/// Count the records of the unfiltered base list falling in a bucket. Used
/// to label the filter chips, independent of the active text query.
pub fn bucket_count(families: &[Family], bucket: DateBucket, today: NaiveDate) -> usize {
    families
        .iter()
        .filter(|f| matches_bucket(f, bucket, today))
        .count()
}
