// src/dedup.rs
//! Violation deduplication: repeated occurrences of one logical issue
//! collapse into a single reportable finding.
//!
//! Per page, records sharing an issue code become one finding with an
//! occurrence count. Across a site, per-page findings merge by the same key;
//! occurrence counts sum while affected pages are a set union, so a page
//! showing the same error fifty times still counts as one affected page.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::IssueCatalog;
use crate::types::{CheckRecord, Impact, PageResult};

/// One deduplicated, reportable issue on a page or across a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub issue_code: String,
    pub touchpoint: String,
    pub impact: Impact,
    pub description: String,
    pub wcag_criteria: BTreeSet<String>,
    /// Raw number of records collapsed into this finding.
    pub occurrence_count: usize,
    /// Distinct pages on which this issue fired. Cardinality of this set,
    /// never `occurrence_count`, is the "affected pages" statistic.
    pub affected_pages: BTreeSet<String>,
}

/// Knobs for the deduplication key.
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupeOptions {
    /// Also key on the touchpoint, for catalogs that reuse an issue code
    /// across touchpoints. Off by default.
    pub key_by_touchpoint: bool,
}

type Key = (String, String);

fn record_key(record: &CheckRecord, opts: DedupeOptions) -> Key {
    let touchpoint = if opts.key_by_touchpoint {
        record.touchpoint.clone()
    } else {
        String::new()
    };
    (record.issue_code.clone(), touchpoint)
}

fn finding_key(finding: &Finding, opts: DedupeOptions) -> Key {
    let touchpoint = if opts.key_by_touchpoint {
        finding.touchpoint.clone()
    } else {
        String::new()
    };
    (finding.issue_code.clone(), touchpoint)
}

/// Collapses one page's violations (errors and warnings only) into findings.
///
/// A group of one renders the specific description from that record's
/// metadata; a larger group renders the generic variant, since per-instance
/// values cannot be shown once for N instances. Records whose code is absent
/// from the catalog still dedupe by the raw code string; nothing is dropped.
#[must_use]
pub fn dedupe_page(
    page: &PageResult,
    catalog: &IssueCatalog,
    opts: DedupeOptions,
) -> Vec<Finding> {
    // BTreeMap keeps grouping independent of record arrival order.
    let mut groups: BTreeMap<Key, Vec<&CheckRecord>> = BTreeMap::new();
    for record in page.violations() {
        groups.entry(record_key(record, opts)).or_default().push(record);
    }

    let mut findings: Vec<Finding> = groups
        .into_iter()
        .map(|((code, _), group)| build_finding(&code, &group, &page.page_id, catalog))
        .collect();

    sort_findings(&mut findings);
    findings
}

fn build_finding(
    code: &str,
    group: &[&CheckRecord],
    page_id: &str,
    catalog: &IssueCatalog,
) -> Finding {
    let entry = catalog.get(code);

    let impact = group
        .iter()
        .filter_map(|r| r.impact)
        .max()
        .unwrap_or(entry.impact_default);

    let mut wcag_criteria: BTreeSet<String> = group
        .iter()
        .flat_map(|r| r.wcag_criteria.iter().cloned())
        .collect();
    if wcag_criteria.is_empty() {
        wcag_criteria = entry.wcag.clone();
    }

    let description = if group.len() == 1 {
        catalog.render_description(code, &group[0].metadata, false)
    } else {
        catalog.render_description(code, &BTreeMap::new(), true)
    };

    // Smallest touchpoint in the group, so the finding's content does not
    // depend on record arrival order when one code spans touchpoints.
    let touchpoint = group
        .iter()
        .map(|r| r.touchpoint.clone())
        .min()
        .unwrap_or_default();

    let mut affected_pages = BTreeSet::new();
    affected_pages.insert(page_id.to_string());

    Finding {
        issue_code: code.to_string(),
        touchpoint,
        impact,
        description,
        wcag_criteria,
        occurrence_count: group.len(),
        affected_pages,
    }
}

/// Merges per-page findings into site-level findings.
///
/// Pure fold over immutable per-page inputs: occurrence counts sum,
/// affected-page sets union. When the merged finding aggregates more than
/// one occurrence its description is re-rendered from the generic template.
#[must_use]
pub fn merge_site(
    per_page: &[Vec<Finding>],
    catalog: &IssueCatalog,
    opts: DedupeOptions,
) -> Vec<Finding> {
    let mut merged: BTreeMap<Key, Finding> = BTreeMap::new();

    for findings in per_page {
        for finding in findings {
            merged
                .entry(finding_key(finding, opts))
                .and_modify(|existing| {
                    existing.occurrence_count += finding.occurrence_count;
                    existing
                        .affected_pages
                        .extend(finding.affected_pages.iter().cloned());
                    existing
                        .wcag_criteria
                        .extend(finding.wcag_criteria.iter().cloned());
                    existing.impact = existing.impact.max(finding.impact);
                })
                .or_insert_with(|| finding.clone());
        }
    }

    let mut findings: Vec<Finding> = merged
        .into_values()
        .map(|mut f| {
            if f.occurrence_count > 1 {
                f.description =
                    catalog.render_description(&f.issue_code, &BTreeMap::new(), true);
            }
            f
        })
        .collect();

    sort_findings(&mut findings);
    findings
}

/// Presentation order: impact descending, then occurrence count descending,
/// then issue code ascending. Total and order-independent, so repeated runs
/// over shuffled input produce identical output.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        b.impact
            .cmp(&a.impact)
            .then(b.occurrence_count.cmp(&a.occurrence_count))
            .then(a.issue_code.cmp(&b.issue_code))
    });
}
