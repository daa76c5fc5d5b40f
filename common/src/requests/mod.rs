//! Payloads exchanged with the dashboard HTTP API.

use crate::engine::{ChartSlice, DashboardStats, OriginStats};
use crate::model::card::FormCard;
use crate::model::session::CurrentUser;
use crate::model::sort::SortOrder;
use serde::{Deserialize, Serialize};

/// Query string of `GET /api/forms`. Missing values mean "all".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormsQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub origin: String,
}

/// Query string of `POST /api/forms/refresh`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub order: String,
}

/// Response of a refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub order: SortOrder,
    /// `false` when a newer refresh finished first and this response was dropped.
    pub applied: bool,
    pub total: usize,
}

/// Query string of `GET /api/exports/monthly`, `period` as `MM/AAAA`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyQuery {
    pub period: Option<String>,
}

/// Body of `POST /api/session`, issued after the login page authenticated
/// against the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub token: String,
    pub user: CurrentUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub authenticated: bool,
    pub user: Option<CurrentUser>,
    pub can_delete: bool,
}

/// Everything the dashboard landing page renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub origins: OriginStats,
    pub chart: Vec<ChartSlice>,
    pub recent: Vec<FormCard>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}
