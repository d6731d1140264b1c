//! Unit tests over the crate's pure logic

pub mod care_score;
pub mod demo_credentials;
pub mod search_filter;
