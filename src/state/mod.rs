//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the lifecycle of one crawl step (ready, running, exhausted, budget reached)
//! - `PageRecord`: what was observed when a page was fetched

mod crawl_phase;
mod page_record;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use page_record::{PageRecord, CONNECTION_FAILED};
