//! Test case data model

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single test step. Exactly three components, always.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestStep {
    pub step: String,
    #[serde(alias = "test_data")]
    pub data: String,
    #[serde(alias = "expected_result")]
    pub expected: String,
}

impl TestStep {
    pub fn new(
        step: impl Into<String>,
        data: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            step: step.into(),
            data: data.into(),
            expected: expected.into(),
        }
    }

    /// Parse a `Step | Test Data | Expected Result` line.
    ///
    /// Any part count other than three is rejected; the interactive caller
    /// re-prompts, the batch planner turns it into a per-item error.
    pub fn parse_line(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() != 3 {
            return Err(Error::MalformedStep(format!(
                "expected 3 parts separated by '|', got {}: {:?}",
                parts.len(),
                line
            )));
        }
        Ok(Self::new(
            parts[0].trim(),
            parts[1].trim(),
            parts[2].trim(),
        ))
    }
}

/// Canonical intermediate record for a test case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCaseRecord {
    pub title: String,
    pub preconditions: Vec<String>,
    pub steps: Vec<TestStep>,
}

impl TestCaseRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            preconditions: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Split a `;`-separated preconditions line into trimmed, non-empty items.
    pub fn split_preconditions(input: &str) -> Vec<String> {
        input
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
