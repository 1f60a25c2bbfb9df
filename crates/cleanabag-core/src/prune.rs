use chrono::{NaiveDate, NaiveTime};

use crate::api::Entry;

/// Selection criteria for pruning old entries.
///
/// Unread and starred entries are kept unless their gate is explicitly
/// opened.
#[derive(Debug, Clone, Copy)]
pub struct PruneCriteria {
    /// Entries last updated strictly before midnight UTC of this date qualify.
    pub cutoff: NaiveDate,
    /// Allow unread entries to be removed.
    pub include_unread: bool,
    /// Allow starred entries to be removed.
    pub include_starred: bool,
}

impl PruneCriteria {
    /// Whether `entry` qualifies for removal under these criteria.
    pub fn matches(&self, entry: &Entry) -> bool {
        let cutoff = self.cutoff.and_time(NaiveTime::MIN).and_utc();

        entry.updated_at < cutoff
            && (entry.is_archived || self.include_unread)
            && (!entry.is_starred || self.include_starred)
    }
}

/// Filter `entries` down to the removal set, preserving input order.
pub fn select_prunable(entries: &[Entry], criteria: &PruneCriteria) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| criteria.matches(entry))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn entry(id: u64, archived: bool, starred: bool, updated: &str) -> Entry {
        let updated_at: DateTime<Utc> = updated.parse().unwrap();
        Entry {
            id,
            title: Some(format!("entry {}", id)),
            url: Some(format!("https://example.com/{}", id)),
            is_archived: archived,
            is_starred: starred,
            created_at: updated_at,
            updated_at,
        }
    }

    fn criteria(cutoff: &str, include_unread: bool, include_starred: bool) -> PruneCriteria {
        PruneCriteria {
            cutoff: cutoff.parse().unwrap(),
            include_unread,
            include_starred,
        }
    }

    #[test]
    fn test_never_selects_entries_updated_on_or_after_cutoff() {
        let entries = vec![
            entry(1, true, false, "2021-06-01T00:00:00Z"),
            entry(2, true, false, "2021-01-01T00:00:00Z"),
            entry(3, false, true, "2022-03-15T12:00:00Z"),
        ];

        for unread in [false, true] {
            for starred in [false, true] {
                let selected = select_prunable(&entries, &criteria("2021-01-01", unread, starred));
                assert!(selected.is_empty());
            }
        }
    }

    #[test]
    fn test_cutoff_is_exclusive_at_midnight() {
        // Updated exactly at the cutoff instant: not strictly before, so kept.
        let boundary = vec![entry(1, true, false, "2021-01-01T00:00:00Z")];
        assert!(select_prunable(&boundary, &criteria("2021-01-01", false, false)).is_empty());

        let just_before = vec![entry(1, true, false, "2020-12-31T23:59:59Z")];
        let selected = select_prunable(&just_before, &criteria("2021-01-01", false, false));
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_unread_entries_kept_by_default() {
        let entries = vec![
            entry(1, false, false, "2019-01-01T00:00:00Z"),
            entry(2, false, true, "2019-01-01T00:00:00Z"),
        ];

        let selected = select_prunable(&entries, &criteria("2021-01-01", false, true));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_starred_entries_kept_by_default() {
        let entries = vec![
            entry(1, true, true, "2019-01-01T00:00:00Z"),
            entry(2, false, true, "2019-01-01T00:00:00Z"),
        ];

        let selected = select_prunable(&entries, &criteria("2021-01-01", true, false));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_default_flags_scenario() {
        let entries = vec![
            entry(1, true, false, "2020-01-01T00:00:00Z"),
            entry(2, false, false, "2019-01-01T00:00:00Z"),
        ];

        let selected = select_prunable(&entries, &criteria("2021-01-01", false, false));
        let ids: Vec<u64> = selected.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_include_unread_scenario() {
        let entries = vec![
            entry(1, true, false, "2020-01-01T00:00:00Z"),
            entry(2, false, false, "2019-01-01T00:00:00Z"),
        ];

        let selected = select_prunable(&entries, &criteria("2021-01-01", true, false));
        let ids: Vec<u64> = selected.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_both_gates_must_open_for_unread_starred_entry() {
        let entries = vec![entry(1, false, true, "2019-01-01T00:00:00Z")];

        assert!(select_prunable(&entries, &criteria("2021-01-01", true, false)).is_empty());
        assert!(select_prunable(&entries, &criteria("2021-01-01", false, true)).is_empty());
        assert_eq!(
            select_prunable(&entries, &criteria("2021-01-01", true, true)).len(),
            1
        );
    }

    #[test]
    fn test_preserves_input_order_without_duplicates() {
        // Newest-first, as supplied by the fetch.
        let entries = vec![
            entry(5, true, false, "2020-05-01T00:00:00Z"),
            entry(4, false, false, "2020-04-01T00:00:00Z"),
            entry(3, true, true, "2020-03-01T00:00:00Z"),
            entry(2, true, false, "2020-02-01T00:00:00Z"),
            entry(1, true, false, "2020-01-01T00:00:00Z"),
        ];

        let selected = select_prunable(&entries, &criteria("2021-01-01", true, true));
        let ids: Vec<u64> = selected.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);

        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
    }
}
