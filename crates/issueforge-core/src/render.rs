//! Description rendering
//!
//! Turns canonical records into the wiki-markup description string the
//! tracker stores. Bug reports have two named strategies (the service and
//! standalone variants of the formatter historically diverged on the
//! environment block); test cases render their steps either as a flat block
//! list or as a three-column table.

use crate::extract::strip_ordinal;
use crate::models::{BugRecord, TestStep};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Which environment block a bug description carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugRenderMode {
    /// Fixed OS/browser block, independent of the record's own environment.
    #[default]
    StaticEnvironment,
    /// Title/environment/description sections drawn from the record itself.
    RecordEnvironment,
}

impl BugRenderMode {
    /// Parse a configuration value ("static" / "record").
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "static" => Some(BugRenderMode::StaticEnvironment),
            "record" => Some(BugRenderMode::RecordEnvironment),
            _ => None,
        }
    }
}

/// How test steps are laid out in the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStepStyle {
    /// Step / Test Data / Expected Result block per step.
    #[default]
    Flat,
    /// Wiki table: header row plus one row per step.
    Table,
}

impl TestStepStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "flat" => Some(TestStepStyle::Flat),
            "table" => Some(TestStepStyle::Table),
            _ => None,
        }
    }
}

/// Render a bug description with the selected strategy.
pub fn render_bug(record: &BugRecord, mode: BugRenderMode) -> String {
    match mode {
        BugRenderMode::StaticEnvironment => render_bug_static(record),
        BugRenderMode::RecordEnvironment => render_bug_record(record),
    }
}

fn render_bug_static(record: &BugRecord) -> String {
    let mut out = String::new();
    out.push_str("*Steps to Reproduce:*\n");
    for step in &record.steps {
        let _ = writeln!(out, "- {}", step);
    }
    let _ = write!(out, "\n*Actual Result:*\n{}\n", record.actual);
    let _ = write!(out, "\n*Expected Result:*\n{}\n", record.expected);
    out.push_str("\n*Environment:*\n- OS: Windows 11 x64\n- Browsers: Chrome, Firefox, Edge");
    out
}

fn render_bug_record(record: &BugRecord) -> String {
    let mut out = String::new();
    let _ = write!(out, "*Title:* {}\n", record.title);
    let _ = write!(out, "\n*Environment:*\n{}\n", record.environment);
    let _ = write!(out, "\n*Description:*\n{}\n", record.description);
    out.push_str("\n*Steps to Reproduce:*\n");
    for (index, step) in record.steps.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, step);
    }
    let _ = write!(out, "\n*Expected Behavior:*\n{}\n", record.expected);
    let _ = write!(out, "\n*Actual Behavior:*\n{}", record.actual);
    out
}

/// Render a test case description: bulleted preconditions followed by the
/// steps in the selected style.
pub fn render_test_case(
    preconditions: &[String],
    steps: &[TestStep],
    style: TestStepStyle,
) -> String {
    let mut out = String::new();
    out.push_str("*Preconditions:*\n");
    for condition in preconditions {
        let _ = writeln!(out, "- {}", condition.trim());
    }
    out.push_str("\n*Test Steps:*\n");
    match style {
        TestStepStyle::Flat => {
            for step in steps {
                let _ = write!(
                    out,
                    "- *Step:* {}\n  *Test Data:* {}\n  *Expected Result:* {}\n\n",
                    step.step, step.data, step.expected
                );
            }
        }
        TestStepStyle::Table => {
            out.push_str("||Step||Test Data||Expected Result||\n");
            for step in steps {
                let _ = writeln!(
                    out,
                    "|{}|{}|{}|",
                    strip_ordinal(&step.step),
                    step.data,
                    step.expected
                );
            }
        }
    }
    out.trim_end().to_string()
}
