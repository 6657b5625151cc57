//! Terminal tracker for monthly habits. A tracker is a grid of days and tasks, every cell of
//! which is a checkbox. All trackers are kept in a single JSON file that is rewritten after every
//! change.
//!

pub mod cli;
pub mod fs;
pub mod storage;
pub mod utils;
