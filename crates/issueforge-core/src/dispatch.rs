//! Request planning
//!
//! Turns an [`IssueRequest`] into the ordered sequence of tracker-ready
//! payloads it implies, or a structured rejection. Planning is pure: every
//! validation failure is decided here, before any network traffic.

use crate::models::bug::{FALLBACK_DESCRIPTION, FALLBACK_ENVIRONMENT};
use crate::models::{BugRecord, IssuePayload, IssueRequest, IssueType, TestCaseEntry};
use crate::render::{self, BugRenderMode, TestStepStyle};
use crate::{Error, Result};

/// Process-wide defaults injected at startup; read-only per request.
#[derive(Debug, Clone)]
pub struct PlanDefaults {
    pub project_key: String,
    pub bug_mode: BugRenderMode,
    pub test_style: TestStepStyle,
}

impl PlanDefaults {
    pub fn new(project_key: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            bug_mode: BugRenderMode::default(),
            test_style: TestStepStyle::default(),
        }
    }
}

/// One planned submission. Batch entries that fail local validation become
/// `Rejected` without affecting their siblings.
#[derive(Debug)]
pub enum Planned {
    Ready(IssuePayload),
    Rejected { summary: String, reason: Error },
}

/// Plan a request into its ordered submissions.
///
/// An `Err` is a request-level rejection (nothing will be submitted); a
/// `Planned::Rejected` item is a per-entry rejection inside an otherwise
/// valid batch.
pub fn plan(request: IssueRequest, defaults: &PlanDefaults) -> Result<Vec<Planned>> {
    let summary = match request.summary.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            return Err(Error::Validation(
                "Missing required fields (summary, issuetype)".to_string(),
            ))
        }
    };
    let issuetype: IssueType = match request.issuetype.as_deref() {
        Some(tag) => tag.parse()?,
        None => {
            return Err(Error::Validation(
                "Missing required fields (summary, issuetype)".to_string(),
            ))
        }
    };

    match issuetype {
        IssueType::Bug if request.description.is_none() && !request.has_bug_fields() => {
            return Err(Error::Validation(
                "Bug requests need a description or steps/actual/expected fields".to_string(),
            ));
        }
        IssueType::Test if request.description.is_none() && !request.has_test_fields() => {
            return Err(Error::Validation(
                "Test requests need a description or preconditions/test steps".to_string(),
            ));
        }
        _ => {}
    }

    let project_key = request
        .project_key
        .clone()
        .unwrap_or_else(|| defaults.project_key.clone());
    let labels = request.labels.clone().normalize();

    // Batch branch: one payload per test case entry, inheriting the
    // request-level project key and labels.
    if issuetype == IssueType::Test {
        if let Some(entries) = request.test_cases.clone() {
            if !entries.is_empty() {
                return Ok(entries
                    .into_iter()
                    .map(|entry| {
                        plan_batch_entry(entry, &summary, &project_key, &labels, defaults)
                    })
                    .collect());
            }
        }
    }

    let description = match request.description.clone() {
        Some(explicit) => explicit,
        None => render_description(&request, &summary, issuetype, defaults)?,
    };

    Ok(vec![Planned::Ready(IssuePayload {
        project_key,
        summary,
        description,
        issuetype,
        labels,
    })])
}

fn plan_batch_entry(
    entry: TestCaseEntry,
    request_summary: &str,
    project_key: &str,
    labels: &[String],
    defaults: &PlanDefaults,
) -> Planned {
    let summary = entry
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(request_summary)
        .to_string();

    let preconditions = entry.preconditions.into_list();
    let mut steps = Vec::with_capacity(entry.test_steps.len());
    for input in entry.test_steps {
        match input.into_step() {
            Ok(step) => steps.push(step),
            Err(reason) => return Planned::Rejected { summary, reason },
        }
    }

    Planned::Ready(IssuePayload {
        project_key: project_key.to_string(),
        summary,
        description: render::render_test_case(&preconditions, &steps, defaults.test_style),
        issuetype: IssueType::Test,
        labels: labels.to_vec(),
    })
}

fn render_description(
    request: &IssueRequest,
    summary: &str,
    issuetype: IssueType,
    defaults: &PlanDefaults,
) -> Result<String> {
    match issuetype {
        IssueType::Bug => {
            let record = BugRecord {
                title: summary.to_string(),
                environment: request
                    .environment
                    .clone()
                    .unwrap_or_else(|| FALLBACK_ENVIRONMENT.to_string()),
                description: FALLBACK_DESCRIPTION.to_string(),
                steps: request.steps_to_reproduce.clone(),
                expected: request.expected_result.clone().unwrap_or_default(),
                actual: request.actual_result.clone().unwrap_or_default(),
            };
            Ok(render::render_bug(&record, defaults.bug_mode))
        }
        IssueType::Test => {
            let preconditions = request.preconditions.clone().into_list();
            let mut steps = Vec::with_capacity(request.test_steps.len());
            for input in request.test_steps.clone() {
                steps.push(input.into_step()?);
            }
            Ok(render::render_test_case(
                &preconditions,
                &steps,
                defaults.test_style,
            ))
        }
        // Task, Story and Epic carry no synthesized description.
        IssueType::Task | IssueType::Story | IssueType::Epic => Ok(String::new()),
    }
}
