//! Aggregation, deduplication, and scoring core for web accessibility
//! test results.
//!
//! The browser-automation layer runs many independent check routines inside
//! a page and hands the raw results here as an unordered batch. This crate
//! validates the batch, partitions it per page, collapses repeated
//! violations into findings, computes the accessibility and compliance
//! scores, and assembles the summary handed back to persistence and
//! reporting.

pub mod aggregate;
pub mod catalog;
pub mod dedup;
pub mod error;
pub mod ingest;
pub mod report;
pub mod score;
pub mod summary;
pub mod types;
