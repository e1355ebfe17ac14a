//! Plain-text suite report rendering.

use std::fmt::Write as _;

use clinicheck_domain::{CaseOutcome, SuiteReport};

/// Renders a suite report as plain text.
///
/// One block per case with a line per assertion; failed assertions show
/// the expected predicate and the observed value.
#[must_use]
pub fn render(report: &SuiteReport) -> String {
    let mut out = String::new();

    for case in &report.cases {
        let marker = if case.outcome.is_pass() { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "[{marker}] {} ({} ms)", case.case_name, case.duration_ms);

        match &case.outcome {
            CaseOutcome::Invalid { error } => {
                let _ = writeln!(out, "       invalid case definition: {error}");
                continue;
            }
            CaseOutcome::Transport { error } => {
                let _ = writeln!(out, "       transport failure: {error}");
                continue;
            }
            CaseOutcome::Passed | CaseOutcome::Failed => {}
        }

        for result in &case.results {
            let marker = if result.passed { "ok" } else { "FAILED" };
            let _ = write!(out, "  {marker:>6}  {}", result.assertion.description());
            if !result.passed {
                if let Some(actual) = &result.actual {
                    let _ = write!(out, " (actual: {actual})");
                }
            }
            let _ = writeln!(out);
            if let (false, Some(error)) = (result.passed, &result.error) {
                let _ = writeln!(out, "          {error}");
            }
        }
    }

    let verdict = if report.all_passed() { "PASSED" } else { "FAILED" };
    let _ = writeln!(
        out,
        "\n{verdict}: {} of {} cases passed in {} ms",
        report.passed, report.total, report.duration_ms
    );

    out
}
