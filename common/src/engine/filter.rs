//! Search, status and origin filters over a snapshot.

use crate::model::form::{FormRecord, FormStatus};
use crate::model::origin::{OTHER_SENTINEL, Origin, OriginCategory};

/// Origin criterion of the dashboard's origin selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OriginFilter {
    #[default]
    All,
    Category(OriginCategory),
    /// The `outro` option: anything outside the fixed category list,
    /// including records that carry no origin at all.
    Other,
    /// A free-text value outside the fixed list, matched exactly.
    Exact(String),
}

impl OriginFilter {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => OriginFilter::All,
            OTHER_SENTINEL | "other" => OriginFilter::Other,
            _ => match OriginCategory::from_wire_label(raw) {
                Some(category) => OriginFilter::Category(category),
                None => OriginFilter::Exact(raw.to_string()),
            },
        }
    }

    pub fn matches(&self, origin: Option<&Origin>) -> bool {
        match (self, origin) {
            (OriginFilter::All, _) => true,
            (OriginFilter::Other, None | Some(Origin::Other(_))) => true,
            (OriginFilter::Other, Some(Origin::Known(_))) => false,
            (OriginFilter::Category(wanted), Some(Origin::Known(category))) => wanted == category,
            (OriginFilter::Exact(wanted), Some(Origin::Other(text))) => wanted == text,
            _ => false,
        }
    }
}

/// Criteria combined with logical AND.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFilter {
    /// Lowercased search term; empty matches everything.
    search: String,
    status: Option<FormStatus>,
    origin: OriginFilter,
}

impl FormFilter {
    /// Builds a filter from the raw selector values. Empty strings mean "all".
    pub fn parse(search: &str, status: &str, origin: &str) -> Result<Self, String> {
        let status = if status.is_empty() {
            None
        } else {
            Some(status.parse::<FormStatus>()?)
        };
        Ok(Self {
            search: search.to_lowercase(),
            status,
            origin: OriginFilter::parse(origin),
        })
    }

    pub fn matches(&self, form: &FormRecord) -> bool {
        self.matches_search(form)
            && self.status.is_none_or(|status| form.status == status)
            && self.origin.matches(form.origin())
    }

    fn matches_search(&self, form: &FormRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.as_str();
        let contains = |text: &str| text.to_lowercase().contains(term);
        contains(&form.title)
            || contains(&form.description)
            || form.occurrence_description().is_some_and(contains)
            || form.creator_name().is_some_and(contains)
    }
}

/// Records matching `criteria`, in snapshot order.
pub fn filter(snapshot: &[FormRecord], criteria: &FormFilter) -> Vec<FormRecord> {
    snapshot
        .iter()
        .filter(|form| criteria.matches(form))
        .cloned()
        .collect()
}
