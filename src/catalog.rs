// src/catalog.rs
//! Static issue metadata: human-readable descriptions keyed by issue code.
//!
//! Lookup never fails. An unknown code gets a synthesized default entry so
//! that aggregation is never blocked on catalog completeness.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RollupError};
use crate::types::Impact;

/// Matches `%(name)s` placeholders in description templates.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\((\w+)\)s").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Catalog entry for one issue code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMetadata {
    pub title: String,
    /// Per-instance description template; `%(key)s` placeholders are filled
    /// from a record's metadata.
    pub what: String,
    /// Variant used when one finding aggregates many records with differing
    /// metadata, so per-instance values cannot be shown.
    #[serde(default)]
    pub what_generic: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub remediation: String,
    #[serde(default)]
    pub wcag: BTreeSet<String>,
    #[serde(default = "default_impact")]
    pub impact_default: Impact,
}

const fn default_impact() -> Impact {
    Impact::Medium
}

/// Read-only lookup from issue code to metadata, loaded once at startup.
///
/// Constructed explicitly and passed by reference into the aggregation and
/// scoring stages; there is no ambient global catalog.
#[derive(Debug, Clone, Default)]
pub struct IssueCatalog {
    entries: HashMap<String, IssueMetadata>,
}

impl IssueCatalog {
    /// Creates an empty catalog. Every lookup will synthesize a default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a JSON object mapping issue code to metadata.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: HashMap<String, IssueMetadata> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Loads a catalog from a JSON file on disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| RollupError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_json_str(&json)
    }

    /// Inserts an entry. A duplicate code replaces the previous entry;
    /// last one wins, logged so catalog hygiene problems are visible.
    pub fn insert(&mut self, code: impl Into<String>, meta: IssueMetadata) {
        let code = code.into();
        if self.entries.insert(code.clone(), meta).is_some() {
            warn!("duplicate catalog entry for '{code}', keeping the later one");
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the code has a real (non-synthesized) entry.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Looks up an issue code. Never fails: unknown codes get a synthesized
    /// default entry built from the code itself.
    #[must_use]
    pub fn get(&self, code: &str) -> IssueMetadata {
        if let Some(meta) = self.entries.get(code) {
            return meta.clone();
        }
        debug!("no catalog entry for '{code}', synthesizing a default");
        synthesize_entry(code)
    }

    /// Renders a description for `code`, substituting `%(key)s` placeholders
    /// from `metadata`. When `generic` is set (a finding aggregating many
    /// records), the `what_generic` template is used if present.
    ///
    /// A placeholder with no matching metadata key renders as an empty
    /// string and is logged; rendering never fails.
    #[must_use]
    pub fn render_description(
        &self,
        code: &str,
        metadata: &BTreeMap<String, String>,
        generic: bool,
    ) -> String {
        let entry = self.get(code);
        let template = if generic && !entry.what_generic.is_empty() {
            &entry.what_generic
        } else {
            &entry.what
        };
        render_template(code, template, metadata)
    }
}

fn render_template(code: &str, template: &str, metadata: &BTreeMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let key = &caps[1];
            metadata.get(key).cloned().unwrap_or_else(|| {
                warn!("template for '{code}' references missing metadata key '{key}'");
                String::new()
            })
        })
        .into_owned()
}

fn synthesize_entry(code: &str) -> IssueMetadata {
    let title = humanize_code(code);
    IssueMetadata {
        what: format!("{title} detected on this page."),
        what_generic: format!("{title} detected on this page."),
        why: String::new(),
        who: String::new(),
        remediation: format!(
            "Review the flagged element and consult WCAG guidance for {title}."
        ),
        wcag: BTreeSet::new(),
        impact_default: Impact::Medium,
        title,
    }
}

/// Turns an issue code into a readable title: strips a kind prefix and
/// splits the camel-case stem (`ErrEmptyHeading` -> "Empty Heading").
#[must_use]
pub fn humanize_code(code: &str) -> String {
    let stem = ["Err", "Warn", "Info", "Disco", "Pass"]
        .iter()
        .find_map(|p| code.strip_prefix(p).filter(|s| !s.is_empty()))
        .unwrap_or(code);

    let mut title = String::with_capacity(stem.len() + 4);
    let mut prev_lower = false;
    for ch in stem.chars() {
        // "ColorContrastAA" -> "Color Contrast AA", acronym runs stay intact
        if ch.is_uppercase() && prev_lower {
            title.push(' ');
        }
        prev_lower = ch.is_lowercase();
        title.push(ch);
    }
    if title.is_empty() {
        code.to_string()
    } else {
        title
    }
}
