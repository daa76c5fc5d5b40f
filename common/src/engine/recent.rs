use crate::model::form::FormRecord;

/// Size of the "recent forms" panel.
pub const RECENT_DEFAULT: usize = 5;

/// The `n` most recently updated records, newest first. Ties keep snapshot
/// order because the sort is stable.
pub fn recent(snapshot: &[FormRecord], n: usize) -> Vec<FormRecord> {
    let mut ordered: Vec<&FormRecord> = snapshot.iter().collect();
    ordered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    ordered.into_iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::form;
    use chrono::{Duration, TimeZone, Utc};

    fn updated(id: &str, hours: i64) -> FormRecord {
        let base = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let mut form = form(id, id, "pending", None, None);
        form.updated_at = base + Duration::hours(hours);
        form
    }

    #[test]
    fn newest_first_and_capped() {
        let snapshot = vec![
            updated("a", 1),
            updated("b", 7),
            updated("c", 3),
            updated("d", 9),
            updated("e", 2),
            updated("f", 5),
        ];
        let ids: Vec<_> = recent(&snapshot, RECENT_DEFAULT)
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, ["d", "b", "f", "c", "e"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let snapshot = vec![updated("x", 4), updated("y", 4), updated("z", 6), updated("w", 4)];
        let ids: Vec<_> = recent(&snapshot, 10).into_iter().map(|f| f.id).collect();
        assert_eq!(ids, ["z", "x", "y", "w"]);
    }

    #[test]
    fn does_not_reorder_the_snapshot() {
        let snapshot = vec![updated("a", 1), updated("b", 2)];
        let _ = recent(&snapshot, 1);
        assert_eq!(snapshot[0].id, "a");
        assert!(recent(&[], RECENT_DEFAULT).is_empty());
    }
}
