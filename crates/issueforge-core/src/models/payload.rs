//! Tracker-ready issue payload

use crate::models::request::IssueType;
use serde::{Deserialize, Serialize};

/// The canonical structure submitted to the tracker to create one issue.
///
/// One-way derived from the canonical records by the planner; never mutated
/// after construction. Field mapping to the tracker's wire format lives in
/// the client crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuePayload {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issuetype: IssueType,
    pub labels: Vec<String>,
}
