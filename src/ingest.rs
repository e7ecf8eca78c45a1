// src/ingest.rs
//! Ingestion boundary: loose records from the browser layer become
//! validated [`CheckRecord`]s.
//!
//! The check routines run inside a page context and emit short-keyed JSON
//! (`err`, `cat`, `xpath`). Everything is validated here, once, so the rest
//! of the pipeline can trust its inputs. A malformed record degrades the
//! batch, never aborts it.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;
use serde::Deserialize;

use crate::error::Result;
use crate::types::{CheckRecord, Impact, Kind};

/// The wire shape of one check result as emitted by the browser layer.
/// Field aliases cover the short keys used by the in-page routines.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(alias = "err", alias = "code")]
    pub issue_code: String,
    #[serde(alias = "cat", default)]
    pub touchpoint: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub xpath: Option<String>,
    #[serde(default)]
    pub element: Option<String>,
    #[serde(alias = "html", default)]
    pub html_snippet: Option<String>,
    #[serde(alias = "wcag", default)]
    pub wcag_criteria: BTreeSet<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Validates and normalizes one raw record.
///
/// Returns `None` (after logging) for an unrecognized kind; the record is
/// dropped rather than misfiled. Legacy four-level impact values are folded
/// into the three-level scale here; unknown impact strings become no impact.
#[must_use]
pub fn normalize(raw: RawRecord) -> Option<CheckRecord> {
    let Some(kind) = Kind::parse(&raw.kind) else {
        warn!(
            "dropping record '{}': unrecognized kind '{}'",
            raw.issue_code, raw.kind
        );
        return None;
    };

    let impact = match raw.impact.as_deref() {
        None | Some("") | Some("none") => None,
        Some(s) => {
            let parsed = Impact::parse(s);
            if parsed.is_none() {
                warn!(
                    "record '{}': unrecognized impact '{s}', treating as none",
                    raw.issue_code
                );
            }
            parsed
        }
    };

    Some(CheckRecord {
        kind,
        issue_code: raw.issue_code,
        touchpoint: raw.touchpoint,
        impact,
        xpath: raw.xpath,
        element: raw.element,
        html_snippet: raw.html_snippet,
        wcag_criteria: raw.wcag_criteria,
        metadata: raw.metadata,
    })
}

/// Normalizes a whole batch, dropping (and logging) invalid records.
#[must_use]
pub fn ingest_batch(raws: Vec<RawRecord>) -> Vec<CheckRecord> {
    raws.into_iter().filter_map(normalize).collect()
}

/// Parses a JSON array of raw records and normalizes it.
///
/// # Errors
/// Returns an error only when the JSON itself is malformed; individual
/// invalid records are dropped, not fatal.
pub fn ingest_json(json: &str) -> Result<Vec<CheckRecord>> {
    let raws: Vec<RawRecord> = serde_json::from_str(json)?;
    Ok(ingest_batch(raws))
}
