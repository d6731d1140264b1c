//! Har Ghar Munga: moringa plant distribution tracking.
//!
//! Anganwadi workers register families, families upload plant photos, and
//! supervisors follow distribution progress. The TUI in [`ui`] drives
//! everything through the [`api::FamilyRepository`] seam, which is backed
//! either by the HTTP client or by in-memory demo fixtures.

pub mod api;
pub mod demo;
pub mod models;
pub mod progress;
pub mod search;
pub mod ui;
