//! IssueForge core
//!
//! Tracker-agnostic records, field extraction, description rendering and
//! request planning. Everything here is pure: no IO, no network.

pub mod dispatch;
pub mod error;
pub mod extract;
pub mod models;
pub mod render;

pub use error::{Error, Result};
