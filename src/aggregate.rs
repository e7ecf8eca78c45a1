// src/aggregate.rs
//! Collects one page's check records into a partitioned [`PageResult`].
//!
//! Records arrive as an unordered batch (the in-page routines run in any
//! order); routing is strictly by kind, so the partition invariant holds by
//! construction.

use crate::types::{CheckRecord, Kind, PageResult};

/// Accumulates check records for one page, one run.
pub struct Aggregator {
    page: PageResult,
}

impl Aggregator {
    #[must_use]
    pub fn new(page_id: impl Into<String>, test_date: impl Into<String>) -> Self {
        Self {
            page: PageResult {
                page_id: page_id.into(),
                test_date: test_date.into(),
                ..PageResult::default()
            },
        }
    }

    /// Routes one record into the partition matching its kind.
    pub fn push(&mut self, record: CheckRecord) {
        let partition = match record.kind {
            Kind::Error => &mut self.page.errors,
            Kind::Warning => &mut self.page.warnings,
            Kind::Info => &mut self.page.info,
            Kind::Discovery => &mut self.page.discovery,
            Kind::Pass => &mut self.page.passes,
        };
        partition.push(record);
    }

    /// Finishes the run and returns the partitioned result.
    #[must_use]
    pub fn finish(self) -> PageResult {
        self.page
    }
}

/// Partitions a full batch in one call.
#[must_use]
pub fn aggregate(
    page_id: impl Into<String>,
    test_date: impl Into<String>,
    records: Vec<CheckRecord>,
) -> PageResult {
    let mut agg = Aggregator::new(page_id, test_date);
    for record in records {
        agg.push(record);
    }
    agg.finish()
}
