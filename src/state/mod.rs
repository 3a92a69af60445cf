//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: run-scoped counters (saved, visited, fetched, failed)
//! - `CrawlPhase` / `StopReason`: the driver's state machine
//! - `CrawlReport`: what a finished run hands back to the caller

mod crawl_state;
mod report;

// Re-export main types
pub use crawl_state::{CrawlPhase, CrawlState, StopReason};
pub use report::CrawlReport;
