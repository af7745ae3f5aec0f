//! Interactive prompt helpers
//!
//! Written over `BufRead`/`Write` so the loops can be unit tested with
//! in-memory cursors. The sentinel line "done" terminates multi-line input.

use issueforge_core::models::{TestCaseRecord, TestStep};
use std::io::{self, BufRead, Write};

const SENTINEL: &str = "done";

/// Read pasted lines until the sentinel (case-insensitive) or end of input.
pub fn read_until_done(input: &mut impl BufRead) -> io::Result<String> {
    let mut text = String::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().eq_ignore_ascii_case(SENTINEL) {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

/// Read a single trimmed line. `None` means end of input, which callers
/// must treat as "stop asking" rather than as a blank answer.
pub fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for test steps one `Step | Test Data | Expected Result` line at a
/// time until the sentinel. A malformed line triggers a warning and a
/// re-prompt; it never ends the loop.
pub fn read_test_steps(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<Vec<TestStep>> {
    let mut steps = Vec::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case(SENTINEL) {
            break;
        }
        match TestStep::parse_line(line) {
            Ok(step) => steps.push(step),
            Err(_) => {
                writeln!(
                    output,
                    "Invalid format. Please enter: Step | Test Data | Expected Result"
                )?;
            }
        }
    }
    Ok(steps)
}

/// Full interactive test-case collection: title, `;`-separated
/// preconditions, then step lines.
pub fn read_test_case(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<TestCaseRecord> {
    writeln!(output, "Enter Test Case Title:")?;
    let title = read_line(input)?.unwrap_or_default();

    writeln!(
        output,
        "Enter Precondition(s) (separate multiple with ';'):"
    )?;
    let preconditions =
        TestCaseRecord::split_preconditions(&read_line(input)?.unwrap_or_default());

    writeln!(
        output,
        "Enter Test Steps (Step | Test Data | Expected Result, one per line, 'done' to finish):"
    )?;
    let steps = read_test_steps(input, output)?;

    Ok(TestCaseRecord {
        title,
        preconditions,
        steps,
    })
}
