//! # EWGF Stats
//!
//! Season-aware player statistics for a fighting game stat tracker.
//!
//! ## Architecture
//!
//! - **models**: Players, character stat records, battles and summaries
//! - **calculate**: Season classification, character aggregation, matchups
//! - **storage**: Player and battle store traits with JSONL and in-memory backends
//! - **service**: Validated read operations combining stores and calculations
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod service;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use models::*;
