//! equiweight-rebalancer: monthly equal-weight rebalancing from the command line.
//!
//! Reads the ranking and last month's snapshot, fetches quotes, runs the
//! distribution engine once, prints the report, and writes this month's
//! snapshot, with an audit trail of every step.

pub mod audit;
pub mod config;
pub mod error;
pub mod ranking;
pub mod report;
pub mod run;
pub mod snapshot;
