// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The outcome class of a single check evaluation.
///
/// Only `Error` and `Warning` count as violations. `Info` and `Discovery`
/// guide manual review and must never feed a violation count or a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Error,
    Warning,
    Info,
    Discovery,
    Pass,
}

impl Kind {
    /// Parses the kind strings emitted by the browser-side check routines.
    /// Returns `None` for anything unrecognized; callers drop-and-log.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "error" | "err" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "discovery" | "disco" => Some(Self::Discovery),
            "pass" | "passed" => Some(Self::Pass),
            _ => None,
        }
    }

    /// Returns true for the two kinds that count as violations.
    #[must_use]
    pub const fn is_violation(self) -> bool {
        matches!(self, Self::Error | Self::Warning)
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Discovery => "discovery",
            Self::Pass => "pass",
        }
    }
}

/// Normalized three-level impact scale.
///
/// Ordering is severity: `High > Medium > Low`. The legacy four-level axe
/// scale is folded into this one at the ingestion boundary, never inside
/// the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    /// Parses an impact string, folding the legacy scale
    /// (`critical`/`serious`/`moderate`/`minor`) into three levels.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" | "critical" | "serious" => Some(Self::High),
            "medium" | "moderate" => Some(Self::Medium),
            "low" | "minor" => Some(Self::Low),
            _ => None,
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// One evaluation outcome for one element on one page.
///
/// Records are created once per test run and immutable thereafter. The
/// `xpath`/`element`/`html_snippet` trio locates the element; it is context
/// for humans, not an input to any computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub kind: Kind,
    pub issue_code: String,
    pub touchpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_snippet: Option<String>,
    #[serde(default)]
    pub wcag_criteria: BTreeSet<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Kind prefixes used by issue codes (`ErrEmptyHeading`, `WarnColorRatio`,
/// `PassEmptyHeading`). Pass and fail variants of one routine share the stem.
const CODE_PREFIXES: [&str; 5] = ["Err", "Warn", "Info", "Disco", "Pass"];

impl CheckRecord {
    /// The identity of the underlying check, shared by the pass and fail
    /// variants of one routine. Strips the kind prefix from the issue code;
    /// codes without a recognized prefix are their own identity.
    #[must_use]
    pub fn check_identity(&self) -> &str {
        for prefix in CODE_PREFIXES {
            if let Some(stem) = self.issue_code.strip_prefix(prefix) {
                if !stem.is_empty() {
                    return stem;
                }
            }
        }
        &self.issue_code
    }
}

/// All check records for one page, one run, partitioned by kind.
///
/// Superseded (never mutated) by a later run of the same page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageResult {
    pub page_id: String,
    pub test_date: String,
    pub errors: Vec<CheckRecord>,
    pub warnings: Vec<CheckRecord>,
    pub info: Vec<CheckRecord>,
    pub discovery: Vec<CheckRecord>,
    pub passes: Vec<CheckRecord>,
}

impl PageResult {
    /// Number of violations: errors plus warnings, nothing else. Info and
    /// discovery items are tracked separately and never land here.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Returns the number of informational notes.
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.info.len()
    }

    /// Returns the number of discovery items.
    #[must_use]
    pub fn discovery_count(&self) -> usize {
        self.discovery.len()
    }

    /// Returns true if no violations were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violation_count() == 0
    }

    /// Iterates over the violation partitions only (errors, then warnings).
    pub fn violations(&self) -> impl Iterator<Item = &CheckRecord> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Iterates over every record that represents an evaluated element:
    /// errors, warnings, and passes. Info and discovery are excluded because
    /// they carry no pass/fail judgment.
    pub fn evaluated(&self) -> impl Iterator<Item = &CheckRecord> {
        self.violations().chain(self.passes.iter())
    }

    /// Checks that every record sits in the partition matching its kind.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.errors.iter().all(|r| r.kind == Kind::Error)
            && self.warnings.iter().all(|r| r.kind == Kind::Warning)
            && self.info.iter().all(|r| r.kind == Kind::Info)
            && self.discovery.iter().all(|r| r.kind == Kind::Discovery)
            && self.passes.iter().all(|r| r.kind == Kind::Pass)
    }
}
