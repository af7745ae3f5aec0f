//! Issue-creation request, as received at the service boundary

use crate::models::testcase::{TestStep, TestCaseRecord};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue types the normalizer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    Bug,
    Test,
    Task,
    Story,
    Epic,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Bug => "Bug",
            IssueType::Test => "Test",
            IssueType::Task => "Task",
            IssueType::Story => "Story",
            IssueType::Epic => "Epic",
        }
    }
}

impl FromStr for IssueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Bug" => Ok(IssueType::Bug),
            "Test" => Ok(IssueType::Test),
            "Task" => Ok(IssueType::Task),
            "Story" => Ok(IssueType::Story),
            "Epic" => Ok(IssueType::Epic),
            other => Err(Error::Validation(format!(
                "Invalid issue type '{}'. Use one of: Bug, Test, Task, Story, Epic",
                other
            ))),
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels arrive either as a comma-joined string or an explicit list.
/// Resolved to a canonical list at the boundary, never carried internally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Labels {
    Joined(String),
    List(Vec<String>),
}

impl Default for Labels {
    fn default() -> Self {
        Labels::List(Vec::new())
    }
}

impl Labels {
    /// Canonical label list: the joined form is split on `,` with each
    /// label trimmed and empties dropped; the list form passes through
    /// unchanged.
    pub fn normalize(self) -> Vec<String> {
        match self {
            Labels::Joined(s) => s
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            Labels::List(list) => list,
        }
    }
}

/// Preconditions arrive either as a `;`-joined string or an explicit list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Preconditions {
    Joined(String),
    List(Vec<String>),
}

impl Default for Preconditions {
    fn default() -> Self {
        Preconditions::List(Vec::new())
    }
}

impl Preconditions {
    pub fn into_list(self) -> Vec<String> {
        match self {
            Preconditions::Joined(s) => TestCaseRecord::split_preconditions(&s),
            Preconditions::List(list) => list,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Preconditions::Joined(s) => s.trim().is_empty(),
            Preconditions::List(list) => list.is_empty(),
        }
    }
}

/// A test step supplied either structured or as a `|`-delimited line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TestStepInput {
    Structured(TestStep),
    Line(String),
}

impl TestStepInput {
    pub fn into_step(self) -> Result<TestStep> {
        match self {
            TestStepInput::Structured(step) => Ok(step),
            TestStepInput::Line(line) => TestStep::parse_line(&line),
        }
    }
}

/// One entry of a multi-test-case batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCaseEntry {
    #[serde(alias = "summary")]
    pub title: Option<String>,
    #[serde(default)]
    pub preconditions: Preconditions,
    #[serde(default, alias = "steps")]
    pub test_steps: Vec<TestStepInput>,
}

/// The JSON body accepted by the relay's create-issue endpoint.
///
/// Required fields are optional here on purpose: presence is checked by the
/// planner so missing input yields a structured validation error rather than
/// a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueRequest {
    pub summary: Option<String>,
    pub issuetype: Option<String>,
    pub project_key: Option<String>,
    #[serde(default)]
    pub labels: Labels,
    /// Explicit description override. When present it is submitted verbatim
    /// and no rendering happens.
    pub description: Option<String>,

    // Bug fields
    pub environment: Option<String>,
    #[serde(default)]
    pub steps_to_reproduce: Vec<String>,
    pub actual_result: Option<String>,
    pub expected_result: Option<String>,

    // Test fields
    #[serde(default)]
    pub preconditions: Preconditions,
    #[serde(default)]
    pub test_steps: Vec<TestStepInput>,
    pub test_cases: Option<Vec<TestCaseEntry>>,
}

impl IssueRequest {
    /// Whether the request carries enough bug-specific fields to synthesize
    /// a description.
    pub fn has_bug_fields(&self) -> bool {
        !self.steps_to_reproduce.is_empty()
            || self.actual_result.is_some()
            || self.expected_result.is_some()
    }

    /// Whether the request carries enough test-specific fields to synthesize
    /// a description.
    pub fn has_test_fields(&self) -> bool {
        !self.preconditions.is_empty()
            || !self.test_steps.is_empty()
            || self.test_cases.as_ref().is_some_and(|b| !b.is_empty())
    }
}
