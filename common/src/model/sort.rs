use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Orderings supported by `GET /formularios?ordem=...`.
///
/// Values are validated here before any request is made; unknown orderings
/// never reach the query string. Only `recentes` is known to be served; the
/// other values assume the API's naming and fall back to its default order
/// if it ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "recentes")]
    Recent,
    #[serde(rename = "antigos")]
    Oldest,
    #[serde(rename = "alfabetica")]
    Title,
    #[serde(rename = "status")]
    Status,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Recent,
        SortOrder::Oldest,
        SortOrder::Title,
        SortOrder::Status,
    ];

    /// Value sent as the `ordem` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            SortOrder::Recent => "recentes",
            SortOrder::Oldest => "antigos",
            SortOrder::Title => "alfabetica",
            SortOrder::Status => "status",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(SortOrder::default());
        }
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_query() == s)
            .ok_or_else(|| format!("Ordenação não suportada: {}", s))
    }
}
