//! Counters behind the dashboard cards and the origin chart.

use crate::model::form::{FormRecord, FormStatus};
use crate::model::origin::OriginBucket;
use chrono::{Local, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    /// Records created on the current local calendar day.
    pub due_today: usize,
}

/// Status counts plus records created today in the local time zone.
pub fn stats(snapshot: &[FormRecord]) -> DashboardStats {
    stats_on(snapshot, Local::now().date_naive())
}

/// Same as [`stats`] with an explicit local calendar day.
pub fn stats_on(snapshot: &[FormRecord], today: NaiveDate) -> DashboardStats {
    snapshot.iter().fold(
        DashboardStats {
            total: snapshot.len(),
            ..Default::default()
        },
        |mut acc, form| {
            match form.status {
                FormStatus::Pending => acc.pending += 1,
                FormStatus::Completed => acc.completed += 1,
                FormStatus::Draft => {}
            }
            if form.created_at.with_timezone(&Local).date_naive() == today {
                acc.due_today += 1;
            }
            acc
        },
    )
}

/// Complete per-origin counts: every bucket is present, even at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginStats {
    counts: Vec<(OriginBucket, usize)>,
}

/// One non-empty slice of the origin chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub key: String,
    pub label: String,
    pub count: usize,
    /// Share of the charted total, rounded to the nearest percent.
    pub percent: u32,
}

impl OriginStats {
    fn zeroed() -> Self {
        Self {
            counts: OriginBucket::all().map(|bucket| (bucket, 0)).collect(),
        }
    }

    pub fn get(&self, bucket: OriginBucket) -> usize {
        self.counts
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Number of buckets, always the category count plus one.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Records counted in any bucket.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OriginBucket, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Buckets with at least one record, labelled for the chart legend.
    pub fn chart_slices(&self) -> Vec<ChartSlice> {
        let total = self.total();
        self.iter()
            .filter(|(_, count)| *count > 0)
            .map(|(bucket, count)| ChartSlice {
                key: bucket.key().to_string(),
                label: bucket.chart_label().to_string(),
                count,
                percent: ((count as f64 / total as f64) * 100.0).round() as u32,
            })
            .collect()
    }

    fn increment(&mut self, bucket: OriginBucket) {
        if let Some((_, count)) = self.counts.iter_mut().find(|(b, _)| *b == bucket) {
            *count += 1;
        }
    }
}

impl Serialize for OriginStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (bucket, count) in &self.counts {
            map.serialize_entry(bucket.key(), count)?;
        }
        map.end()
    }
}

/// Counts records per origin bucket. Records without an origin are skipped;
/// values outside the category list land in `outro`.
pub fn origin_stats(snapshot: &[FormRecord]) -> OriginStats {
    let mut stats = OriginStats::zeroed();
    for origin in snapshot.iter().filter_map(FormRecord::origin) {
        stats.increment(origin.bucket());
    }
    stats
}
