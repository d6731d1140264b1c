//! Integration tests against a mocked HTTP backend

pub mod api_client;
