//! Field extraction from pasted bug text
//!
//! Pasted reports follow a loose labeled-section convention: a line starts
//! with a recognized label ("Title:", "Steps to Reproduce:", ...) and the
//! section runs until the next blank line or the end of the text. Extraction
//! is deliberately permissive: a missing or empty section degrades to the
//! documented fallback so malformed input still produces a postable issue.

use crate::models::bug::{
    BugRecord, FALLBACK_DESCRIPTION, FALLBACK_ENVIRONMENT, FALLBACK_RESULT, FALLBACK_TITLE,
};

const LABEL_TITLE: &str = "Title:";
const LABEL_ENVIRONMENT: &str = "Environment:";
const LABEL_DESCRIPTION: &str = "Description:";
const LABEL_STEPS: &str = "Steps to Reproduce:";
const LABEL_EXPECTED: &str = "Expected Behavior:";
const LABEL_ACTUAL: &str = "Actual Behavior:";

/// Extract a [`BugRecord`] from free-form pasted text. Never fails.
pub fn extract_bug(raw_text: &str) -> BugRecord {
    let title = section(raw_text, LABEL_TITLE).unwrap_or_else(|| FALLBACK_TITLE.to_string());
    let environment =
        section(raw_text, LABEL_ENVIRONMENT).unwrap_or_else(|| FALLBACK_ENVIRONMENT.to_string());
    let description =
        section(raw_text, LABEL_DESCRIPTION).unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());
    let expected =
        section(raw_text, LABEL_EXPECTED).unwrap_or_else(|| FALLBACK_RESULT.to_string());
    let actual = section(raw_text, LABEL_ACTUAL).unwrap_or_else(|| FALLBACK_RESULT.to_string());

    // Steps differ from the scalar sections: an empty body is an empty
    // sequence, not a fallback string.
    let steps = section(raw_text, LABEL_STEPS)
        .map(|body| split_steps(&body))
        .unwrap_or_default();

    BugRecord {
        title,
        environment,
        description,
        steps,
        expected,
        actual,
    }
}

/// Greedy-boundary capture: find the first line starting with `label` and
/// return the trimmed text from just after the label up to the next blank
/// line or end of input. `None` when the label is absent or the body trims
/// to nothing.
fn section(text: &str, label: &str) -> Option<String> {
    let start = find_label(text, label)? + label.len();
    let rest = &text[start..];
    let body = match rest.find("\n\n") {
        Some(end) => &rest[..end],
        None => rest,
    };
    let body = body.trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

/// Byte offset of the first occurrence of `label` at the start of a line.
fn find_label(text: &str, label: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with(label) {
            return Some(offset + line.find(label).unwrap_or(0));
        }
        offset += line.len();
    }
    None
}

/// Split a steps body into an ordered sequence: one step per line, ordinal
/// prefixes stripped, blank lines dropped.
fn split_steps(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_ordinal(line).to_string())
        .collect()
}

/// Strip a leading numeric ordinal prefix ("1.", "2)") plus trailing
/// whitespace from a step line. Lines without such a prefix pass through
/// unchanged.
pub fn strip_ordinal(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }
    let rest = &line[digits..];
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(after) => after.trim_start(),
        None => line,
    }
}
