//! Output module for building check reports
//!
//! This module handles:
//! - The JSON report types returned by the service
//! - Joining verification results with link occurrences
//! - Accumulating reports across batches

mod aggregate;
mod report;
mod types;

pub use aggregate::AggregateResult;
pub use report::{assemble, reconcile_counts, status_text, summarize, timestamp_now};
pub use types::{CheckResponse, LinkDetailsResponse, LinkInfo, Summary};
