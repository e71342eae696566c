//! examtrack-core — attempt scoring and statistics aggregation engine.
//!
//! This crate defines the data model for practice tests and attempts, the
//! pure scoring components (correctness evaluation, first-credit
//! deduplication, streak state machine, subject aggregation), the
//! collaborator store traits, and the coordinator that orchestrates a
//! submission end to end.

pub mod coordinator;
pub mod dedup;
pub mod error;
pub mod model;
pub mod parser;
pub mod results;
pub mod scoring;
pub mod streak;
pub mod subjects;
pub mod traits;
