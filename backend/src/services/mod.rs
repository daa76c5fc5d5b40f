//! HTTP surface of the dashboard. Each sub-module owns one `/api/...` scope
//! and exposes `configure_routes()`.

pub mod dashboard;
pub mod exports;
pub mod forms;
pub mod session;
