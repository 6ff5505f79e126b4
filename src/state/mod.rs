//! State module for tracking crawl progress
//!
//! `CrawlState` names where the page loop currently is and which steps are
//! allowed next.

mod crawl_state;

pub use crawl_state::CrawlState;
