//! Bug record data model

use serde::{Deserialize, Serialize};

/// Fallback values substituted when a section is absent from pasted input.
pub const FALLBACK_TITLE: &str = "Untitled Bug";
pub const FALLBACK_ENVIRONMENT: &str = "Not specified";
pub const FALLBACK_DESCRIPTION: &str = "No description provided";
pub const FALLBACK_RESULT: &str = "Not specified";

/// Canonical intermediate record for a bug report.
///
/// Built once by the extractor (or assembled from request fields) and
/// consumed exactly once by the renderer. Every field is guaranteed
/// non-empty: missing input degrades to the documented fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BugRecord {
    pub title: String,
    pub environment: String,
    pub description: String,
    pub steps: Vec<String>,
    pub expected: String,
    pub actual: String,
}

impl Default for BugRecord {
    fn default() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            environment: FALLBACK_ENVIRONMENT.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            steps: Vec::new(),
            expected: FALLBACK_RESULT.to_string(),
            actual: FALLBACK_RESULT.to_string(),
        }
    }
}
