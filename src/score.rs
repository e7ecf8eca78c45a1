// src/score.rs
//! The two page scores.
//!
//! Accessibility score: partial credit at element granularity — of all
//! elements evaluated by applicable checks, what fraction passed.
//! Compliance score: zero tolerance at WCAG success-criterion granularity —
//! of all applicable criteria, what fraction had no violation at all.
//!
//! Both are `Option<f64>`: `None` means no applicable checks/criteria (N/A),
//! which is semantically different from a score of zero and must never be
//! conflated with it. Values stay in floating point internally; rounding to
//! one decimal happens only at display time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Kind, PageResult};

/// Element-level tallies for one check identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStats {
    pub passed: usize,
    pub total: usize,
}

/// Tallies evaluated elements per check identity. A check with no evaluated
/// elements simply has no entry: not applicable, never a failure or a pass.
#[must_use]
pub fn check_stats(page: &PageResult) -> BTreeMap<String, CheckStats> {
    let mut stats: BTreeMap<String, CheckStats> = BTreeMap::new();
    for record in page.evaluated() {
        let entry = stats.entry(record.check_identity().to_string()).or_default();
        entry.total += 1;
        if record.kind == Kind::Pass {
            entry.passed += 1;
        }
    }
    stats
}

/// Per-criterion compliance: `true` iff no error or warning on this page
/// maps to the criterion. Only criteria exercised by at least one evaluated
/// record appear; the rest are not applicable.
#[must_use]
pub fn criterion_stats(page: &PageResult) -> BTreeMap<String, bool> {
    let mut stats: BTreeMap<String, bool> = BTreeMap::new();
    for record in page.evaluated() {
        for criterion in &record.wcag_criteria {
            let compliant = stats.entry(criterion.clone()).or_insert(true);
            if record.kind.is_violation() {
                *compliant = false;
            }
        }
    }
    stats
}

/// Partial-credit score over all applicable checks, element granularity.
#[must_use]
pub fn accessibility_score(page: &PageResult) -> Option<f64> {
    let stats = check_stats(page);
    let passed: usize = stats.values().map(|s| s.passed).sum();
    let total: usize = stats.values().map(|s| s.total).sum();
    percentage(passed, total)
}

/// Zero-tolerance score over all applicable criteria.
#[must_use]
pub fn compliance_score(page: &PageResult) -> Option<f64> {
    let stats = criterion_stats(page);
    let compliant = stats.values().filter(|&&ok| ok).count();
    percentage(compliant, stats.len())
}

/// Site-level score accumulator.
///
/// Folds per-page raw counts and divides once at the end, so no rounding
/// error compounds across pages. Built as a pure fold over immutable page
/// results; folding never mutates its inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteScore {
    pub elements_passed: usize,
    pub elements_total: usize,
    pub criteria_compliant: usize,
    pub criteria_applicable: usize,
}

impl SiteScore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one page's tallies into the accumulator.
    #[must_use]
    pub fn fold(mut self, page: &PageResult) -> Self {
        for stats in check_stats(page).values() {
            self.elements_passed += stats.passed;
            self.elements_total += stats.total;
        }
        for &compliant in criterion_stats(page).values() {
            self.criteria_applicable += 1;
            if compliant {
                self.criteria_compliant += 1;
            }
        }
        self
    }

    /// Site accessibility score, or `None` when nothing was applicable.
    #[must_use]
    pub fn accessibility(&self) -> Option<f64> {
        percentage(self.elements_passed, self.elements_total)
    }

    /// Site compliance score, or `None` when nothing was applicable.
    #[must_use]
    pub fn compliance(&self) -> Option<f64> {
        percentage(self.criteria_compliant, self.criteria_applicable)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64 * 100.0)
}

/// Renders a score for display, one decimal place; `None` renders as "N/A".
#[must_use]
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.1}"),
        None => "N/A".to_string(),
    }
}
