// src/report.rs
//! Terminal rendering for run and site summaries.
//!
//! Output only: everything shown here was computed upstream. Findings print
//! in their presentation order (impact, then occurrences, then code).

use anyhow::Result;
use colored::Colorize;
use std::fmt::Write;

use crate::dedup::Finding;
use crate::score::format_score;
use crate::summary::{RunSummary, SiteSummary};
use crate::types::Impact;

/// Formats a single-page run summary for terminal display.
#[must_use]
pub fn format_terminal(summary: &RunSummary) -> String {
    let mut out = String::new();

    writeln!(out, "{}", "─".repeat(70).dimmed()).ok();
    writeln!(
        out,
        " {} {}",
        "ACCESSIBILITY REPORT".cyan().bold(),
        summary.page.page_id.white()
    )
    .ok();
    writeln!(out, "{}", "─".repeat(70).dimmed()).ok();
    writeln!(out).ok();

    write_counts(
        &mut out,
        summary.page.violation_count(),
        summary.page.info_count(),
        summary.page.discovery_count(),
    );
    write_scores(&mut out, summary.accessibility_score, summary.compliance_score);

    if summary.findings.is_empty() {
        writeln!(out, "{}", "No violations found on this page.".green()).ok();
    } else {
        write_findings(&mut out, &summary.findings, false);
    }

    writeln!(out).ok();
    writeln!(out, "{}", "─".repeat(70).dimmed()).ok();

    out
}

/// Formats a site-level rollup for terminal display.
#[must_use]
pub fn format_site(summary: &SiteSummary) -> String {
    let mut out = String::new();

    writeln!(out, "{}", "─".repeat(70).dimmed()).ok();
    writeln!(
        out,
        " {} ({} pages)",
        "SITE ACCESSIBILITY REPORT".cyan().bold(),
        summary.page_count
    )
    .ok();
    writeln!(out, "{}", "─".repeat(70).dimmed()).ok();
    writeln!(out).ok();

    write_counts(
        &mut out,
        summary.violation_count,
        summary.info_count,
        summary.discovery_count,
    );
    write_scores(&mut out, summary.accessibility_score, summary.compliance_score);

    if summary.findings.is_empty() {
        writeln!(out, "{}", "No violations found across the site.".green()).ok();
    } else {
        write_findings(&mut out, &summary.findings, true);
    }

    writeln!(out).ok();
    writeln!(out, "{}", "─".repeat(70).dimmed()).ok();

    out
}

/// Prints a run summary to stdout.
///
/// # Errors
/// Returns error if formatting fails.
pub fn print_report(summary: &RunSummary) -> Result<()> {
    print!("{}", format_terminal(summary));
    Ok(())
}

fn write_counts(out: &mut String, violations: usize, info: usize, discovery: usize) {
    writeln!(out, "{}", "SUMMARY".cyan().bold()).ok();
    writeln!(out).ok();
    writeln!(
        out,
        "   Violations:      {}",
        violations.to_string().white()
    )
    .ok();
    writeln!(out, "   Info notes:      {}", info.to_string().dimmed()).ok();
    writeln!(
        out,
        "   Discovery items: {}",
        discovery.to_string().dimmed()
    )
    .ok();
    writeln!(out).ok();
}

fn write_scores(out: &mut String, accessibility: Option<f64>, compliance: Option<f64>) {
    writeln!(
        out,
        "   Accessibility score: {}",
        format_score(accessibility).white().bold()
    )
    .ok();
    writeln!(
        out,
        "   Compliance score:    {}",
        format_score(compliance).white().bold()
    )
    .ok();
    writeln!(out).ok();
}

fn write_findings(out: &mut String, findings: &[Finding], site: bool) {
    writeln!(out, "{}", "FINDINGS".cyan().bold()).ok();
    writeln!(out).ok();

    for finding in findings {
        let header = format!(
            "[{}] {} ({} {})",
            finding.impact.label().to_uppercase(),
            finding.issue_code,
            finding.occurrence_count,
            pluralize(finding.occurrence_count, "occurrence", "occurrences"),
        );
        match finding.impact {
            Impact::High => writeln!(out, "   {}", header.red().bold()).ok(),
            Impact::Medium => writeln!(out, "   {}", header.yellow()).ok(),
            Impact::Low => writeln!(out, "   {}", header.dimmed()).ok(),
        };

        if !finding.description.is_empty() {
            writeln!(out, "      {}", finding.description.dimmed()).ok();
        }
        if site {
            writeln!(
                out,
                "      Affected pages: {}",
                finding.affected_pages.len()
            )
            .ok();
        }
        if !finding.wcag_criteria.is_empty() {
            let criteria: Vec<&str> =
                finding.wcag_criteria.iter().map(String::as_str).collect();
            writeln!(out, "      WCAG: {}", criteria.join(", ").dimmed()).ok();
        }
        writeln!(out).ok();
    }
}

fn pluralize(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}
