//! IssueForge JIRA Integration
//!
//! Client library for creating and looking up issues in JIRA.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{JiraClient, Outcome};
pub use config::JiraConfig;
pub use error::{Error, Result};
pub use types::*;
