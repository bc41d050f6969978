//! Simple to use cli for keeping a tally of when you do things. Define items, record when they
//! happen, look at them as a list or as a chart. Everything is kept in a single JSON file that is
//! rewritten after every change.
//!

pub mod chart;
pub mod cli;
pub mod errors;
pub mod fs;
pub mod storage;
pub mod tracker;
pub mod utils;
