// tests/unit_dedup.rs
use a11y_rollup::aggregate::aggregate;
use a11y_rollup::catalog::{IssueCatalog, IssueMetadata};
use a11y_rollup::dedup::{dedupe_page, merge_site, sort_findings, DedupeOptions, Finding};
use a11y_rollup::types::{CheckRecord, Impact, Kind, PageResult};
use std::collections::{BTreeMap, BTreeSet};

fn record(kind: Kind, code: &str, touchpoint: &str, impact: Option<Impact>) -> CheckRecord {
    CheckRecord {
        kind,
        issue_code: code.to_string(),
        touchpoint: touchpoint.to_string(),
        impact,
        xpath: None,
        element: None,
        html_snippet: None,
        wcag_criteria: BTreeSet::new(),
        metadata: BTreeMap::new(),
    }
}

fn page(page_id: &str, records: Vec<CheckRecord>) -> PageResult {
    aggregate(page_id, "2026-08-30", records)
}

fn catalog_with_templates() -> IssueCatalog {
    let mut catalog = IssueCatalog::new();
    catalog.insert(
        "ErrEmptyHeading",
        IssueMetadata {
            title: "Empty heading".to_string(),
            what: "Heading at %(xpath)s has no text.".to_string(),
            what_generic: "Several headings on this page have no text.".to_string(),
            why: String::new(),
            who: String::new(),
            remediation: String::new(),
            wcag: BTreeSet::from(["1.3.1".to_string()]),
            impact_default: Impact::High,
        },
    );
    catalog
}

#[test]
fn test_repeated_issue_collapses_to_one_finding() {
    let catalog = catalog_with_templates();
    let records = vec![
        record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
        record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
        record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
    ];
    let findings = dedupe_page(&page("p1", records), &catalog, DedupeOptions::default());

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].occurrence_count, 3);
    assert_eq!(findings[0].affected_pages.len(), 1);
    assert!(findings[0].affected_pages.contains("p1"));
    // Many occurrences: the generic template, not a per-instance one.
    assert_eq!(
        findings[0].description,
        "Several headings on this page have no text."
    );
}

#[test]
fn test_single_occurrence_uses_specific_template() {
    let catalog = catalog_with_templates();
    let mut rec = record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High));
    rec.metadata
        .insert("xpath".to_string(), "/html/body/h2[3]".to_string());
    let findings = dedupe_page(&page("p1", vec![rec]), &catalog, DedupeOptions::default());

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].description, "Heading at /html/body/h2[3] has no text.");
}

#[test]
fn test_info_and_discovery_never_become_findings() {
    let catalog = IssueCatalog::new();
    let records = vec![
        record(Kind::Info, "InfoHeadingHierarchy", "headings", None),
        record(Kind::Discovery, "DiscoFormOnPage", "forms", None),
        record(Kind::Pass, "PassEmptyHeading", "headings", None),
    ];
    let findings = dedupe_page(&page("p1", records), &catalog, DedupeOptions::default());
    assert!(findings.is_empty(), "only errors and warnings become findings");
}

#[test]
fn test_unknown_code_is_never_dropped() {
    let catalog = IssueCatalog::new();
    let records = vec![record(Kind::Error, "TotallyUnknownCode123", "forms", None)];
    let findings = dedupe_page(&page("p1", records), &catalog, DedupeOptions::default());

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].issue_code, "TotallyUnknownCode123");
    assert!(findings[0].occurrence_count >= 1);
}

#[test]
fn test_dedup_is_order_independent() {
    let catalog = catalog_with_templates();
    let records = vec![
        record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
        record(Kind::Warning, "WarnSmallText", "fonts", Some(Impact::Low)),
        record(Kind::Error, "ErrNoLabel", "forms", Some(Impact::High)),
        record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
        record(Kind::Warning, "WarnSmallText", "fonts", Some(Impact::Low)),
    ];
    let mut reversed = records.clone();
    reversed.reverse();

    let forward = dedupe_page(&page("p1", records), &catalog, DedupeOptions::default());
    let backward = dedupe_page(&page("p1", reversed), &catalog, DedupeOptions::default());

    assert_eq!(forward, backward, "same findings, same order, any input order");
}

#[test]
fn test_dedup_order_independent_across_touchpoints() {
    // One code firing under two touchpoints with the default key: the
    // finding's touchpoint must not depend on which record arrived first.
    let catalog = IssueCatalog::new();
    let records = vec![
        record(Kind::Error, "ErrMissingLabel", "forms", None),
        record(Kind::Error, "ErrMissingLabel", "media", None),
    ];
    let mut reversed = records.clone();
    reversed.reverse();

    let forward = dedupe_page(&page("p1", records), &catalog, DedupeOptions::default());
    let backward = dedupe_page(&page("p1", reversed), &catalog, DedupeOptions::default());

    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 1);
    assert_eq!(forward[0].touchpoint, "forms", "smallest touchpoint wins");
}

#[test]
fn test_presentation_ordering() {
    let mut findings = vec![
        Finding {
            issue_code: "ErrZeta".to_string(),
            touchpoint: "forms".to_string(),
            impact: Impact::High,
            description: String::new(),
            wcag_criteria: BTreeSet::new(),
            occurrence_count: 1,
            affected_pages: BTreeSet::from(["p1".to_string()]),
        },
        Finding {
            issue_code: "ErrAlpha".to_string(),
            touchpoint: "forms".to_string(),
            impact: Impact::High,
            description: String::new(),
            wcag_criteria: BTreeSet::new(),
            occurrence_count: 1,
            affected_pages: BTreeSet::from(["p1".to_string()]),
        },
        Finding {
            issue_code: "WarnBeta".to_string(),
            touchpoint: "fonts".to_string(),
            impact: Impact::Low,
            description: String::new(),
            wcag_criteria: BTreeSet::new(),
            occurrence_count: 50,
            affected_pages: BTreeSet::from(["p1".to_string()]),
        },
        Finding {
            issue_code: "ErrGamma".to_string(),
            touchpoint: "forms".to_string(),
            impact: Impact::High,
            description: String::new(),
            wcag_criteria: BTreeSet::new(),
            occurrence_count: 9,
            affected_pages: BTreeSet::from(["p1".to_string()]),
        },
    ];
    sort_findings(&mut findings);

    let codes: Vec<&str> = findings.iter().map(|f| f.issue_code.as_str()).collect();
    // Impact desc, then occurrences desc, then code asc.
    assert_eq!(codes, ["ErrGamma", "ErrAlpha", "ErrZeta", "WarnBeta"]);
}

#[test]
fn test_site_merge_counts_unique_pages() {
    let catalog = catalog_with_templates();
    let page_a = page(
        "pageA",
        vec![
            record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
            record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
            record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
        ],
    );
    let page_b = page(
        "pageB",
        vec![
            record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
            record(Kind::Error, "ErrEmptyHeading", "headings", Some(Impact::High)),
        ],
    );

    let opts = DedupeOptions::default();
    let per_page = vec![
        dedupe_page(&page_a, &catalog, opts),
        dedupe_page(&page_b, &catalog, opts),
    ];
    let site = merge_site(&per_page, &catalog, opts);

    assert_eq!(site.len(), 1);
    assert_eq!(site[0].occurrence_count, 5, "occurrences sum across pages");
    assert_eq!(site[0].affected_pages.len(), 2, "affected pages is a set union");
    assert!(site[0].affected_pages.contains("pageA"));
    assert!(site[0].affected_pages.contains("pageB"));
}

#[test]
fn test_affected_pages_never_exceeds_occurrences() {
    let catalog = catalog_with_templates();
    let opts = DedupeOptions::default();
    let per_page = vec![
        dedupe_page(
            &page(
                "pageA",
                vec![record(Kind::Error, "ErrEmptyHeading", "headings", None)],
            ),
            &catalog,
            opts,
        ),
        dedupe_page(
            &page(
                "pageB",
                vec![record(Kind::Error, "ErrEmptyHeading", "headings", None)],
            ),
            &catalog,
            opts,
        ),
    ];
    for finding in merge_site(&per_page, &catalog, opts) {
        assert!(finding.affected_pages.len() <= finding.occurrence_count);
    }
}

#[test]
fn test_key_by_touchpoint_splits_reused_codes() {
    let catalog = IssueCatalog::new();
    let records = vec![
        record(Kind::Error, "ErrMissingLabel", "forms", None),
        record(Kind::Error, "ErrMissingLabel", "media", None),
    ];
    let merged = dedupe_page(
        &page("p1", records.clone()),
        &catalog,
        DedupeOptions::default(),
    );
    assert_eq!(merged.len(), 1, "default: one finding per issue code");

    let split = dedupe_page(
        &page("p1", records),
        &catalog,
        DedupeOptions {
            key_by_touchpoint: true,
        },
    );
    assert_eq!(split.len(), 2, "keyed by touchpoint: one finding per pair");
}

#[test]
fn test_renamed_codes_stay_distinct() {
    // A catalog migration renames codes; until records are rewritten the
    // old and new codes must not be silently aliased.
    let catalog = IssueCatalog::new();
    let records = vec![
        record(Kind::Error, "ErrEmptyHeading", "headings", None),
        record(Kind::Error, "ErrHeadingEmpty", "headings", None),
    ];
    let findings = dedupe_page(&page("p1", records), &catalog, DedupeOptions::default());
    assert_eq!(findings.len(), 2);
}
