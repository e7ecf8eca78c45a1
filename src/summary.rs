// src/summary.rs
//! Final run summaries: partitioned results, deduplicated findings, and both
//! scores combined into one object for persistence and reporting.
//!
//! Assembly is pure composition over already-computed pieces. Pages are
//! independent, so many pages summarize in parallel; the site rollup is a
//! sequential fold over the immutable per-page summaries.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::IssueCatalog;
use crate::dedup::{dedupe_page, merge_site, DedupeOptions, Finding};
use crate::score::{accessibility_score, compliance_score, SiteScore};
use crate::types::PageResult;

/// Everything produced by one test run of one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub page: PageResult,
    /// Deduplicated findings, in presentation order.
    pub findings: Vec<Finding>,
    pub accessibility_score: Option<f64>,
    pub compliance_score: Option<f64>,
}

impl RunSummary {
    /// Builds the summary for one page. No new computation beyond the
    /// aggregation, deduplication, and scoring stages.
    #[must_use]
    pub fn build(page: PageResult, catalog: &IssueCatalog, opts: DedupeOptions) -> Self {
        let findings = dedupe_page(&page, catalog, opts);
        let accessibility_score = accessibility_score(&page);
        let compliance_score = compliance_score(&page);
        Self {
            page,
            findings,
            accessibility_score,
            compliance_score,
        }
    }

    /// Checks referential consistency: partitions match their kinds, every
    /// finding traces back to at least one violation record on this page,
    /// and the findings' occurrence counts add up to the violation count.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if !self.page.is_consistent() {
            return false;
        }
        let codes: BTreeSet<&str> = self
            .page
            .violations()
            .map(|r| r.issue_code.as_str())
            .collect();
        let traceable = self
            .findings
            .iter()
            .all(|f| codes.contains(f.issue_code.as_str()));
        let occurrences: usize = self.findings.iter().map(|f| f.occurrence_count).sum();
        traceable && occurrences == self.page.violation_count()
    }
}

/// Rolled-up view over every page of a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSummary {
    pub page_count: usize,
    pub violation_count: usize,
    pub info_count: usize,
    pub discovery_count: usize,
    /// Site-level findings: occurrence counts summed, affected pages unioned.
    pub findings: Vec<Finding>,
    pub accessibility_score: Option<f64>,
    pub compliance_score: Option<f64>,
}

impl SiteSummary {
    /// Folds per-page summaries into the site rollup. The inputs are read
    /// only; nothing in a page summary is mutated while folding.
    #[must_use]
    pub fn build(pages: &[RunSummary], catalog: &IssueCatalog, opts: DedupeOptions) -> Self {
        let per_page: Vec<Vec<Finding>> =
            pages.iter().map(|s| s.findings.clone()).collect();
        let findings = merge_site(&per_page, catalog, opts);

        let score = pages
            .iter()
            .fold(SiteScore::new(), |acc, s| acc.fold(&s.page));

        Self {
            page_count: pages.len(),
            violation_count: pages.iter().map(|s| s.page.violation_count()).sum(),
            info_count: pages.iter().map(|s| s.page.info_count()).sum(),
            discovery_count: pages.iter().map(|s| s.page.discovery_count()).sum(),
            findings,
            accessibility_score: score.accessibility(),
            compliance_score: score.compliance(),
        }
    }
}

/// Summarizes many pages in parallel. Pages share no mutable state, so this
/// is a plain parallel map; order of the output matches the input.
#[must_use]
pub fn summarize_pages(
    pages: Vec<PageResult>,
    catalog: &IssueCatalog,
    opts: DedupeOptions,
) -> Vec<RunSummary> {
    pages
        .into_par_iter()
        .map(|page| RunSummary::build(page, catalog, opts))
        .collect()
}
