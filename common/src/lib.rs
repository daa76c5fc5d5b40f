//! Shared model and pure logic for the RNC dashboard.
//!
//! - `model`: form records, origin categories, sort orders, session user and
//!   the card view rendered by the dashboard.
//! - `engine`: filter, statistics, recency and monthly-report selection over a
//!   snapshot of records. Nothing in here performs I/O.
//! - `requests`: payloads exchanged with the dashboard HTTP API.

pub mod engine;
pub mod model;
pub mod requests;
