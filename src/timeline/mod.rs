//! Month/year timeline grouping.
//!
//! # Invariants
//! - Groups appear in first-occurrence order of their month in the input.
//! - Entries keep their input order inside a group.
//! - Every input entry lands in exactly one group.

mod view;

pub use view::*;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::ChangelogEntry;

/// Entries published in one calendar month.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimelineGroup {
    /// Long month name and year, e.g. "June 2023".
    pub label: String,
    pub entries: Vec<ChangelogEntry>,
}

/// Group label for a calendar date. No time zone is involved.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Partition a date-sorted entry list by calendar month.
pub fn group_by_month(entries: &[ChangelogEntry]) -> Vec<TimelineGroup> {
    let mut groups: Vec<TimelineGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let label = month_label(entry.date);
        match positions.get(&label) {
            Some(&index) => groups[index].entries.push(entry.clone()),
            None => {
                positions.insert(label.clone(), groups.len());
                groups.push(TimelineGroup {
                    label,
                    entries: vec![entry.clone()],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ChangeType, Reactions};

    fn entry(id: &str, date: &str) -> ChangelogEntry {
        ChangelogEntry {
            id: id.to_string(),
            version: format!("v-{}", id),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            title: id.to_string(),
            description: id.to_string(),
            change_type: ChangeType::Fix,
            category: Category::Other,
            reactions: Reactions::zeroed(),
        }
    }

    fn ids(group: &TimelineGroup) -> Vec<&str> {
        group.entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_groups_by_month_in_order() {
        let entries = vec![
            entry("15th", "2023-06-15"),
            entry("10th", "2023-06-10"),
            entry("28th", "2023-05-28"),
        ];

        let groups = group_by_month(&entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "June 2023");
        assert_eq!(ids(&groups[0]), vec!["15th", "10th"]);
        assert_eq!(groups[1].label, "May 2023");
        assert_eq!(ids(&groups[1]), vec!["28th"]);
    }

    #[test]
    fn test_same_month_different_year_are_separate() {
        let entries = vec![entry("a", "2024-01-03"), entry("b", "2023-01-30")];
        let labels: Vec<String> = group_by_month(&entries)
            .into_iter()
            .map(|g| g.label)
            .collect();
        assert_eq!(labels, vec!["January 2024", "January 2023"]);
    }

    #[test]
    fn test_month_boundaries_use_calendar_date() {
        assert_eq!(
            month_label(NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()),
            "July 2023"
        );
        assert_eq!(
            month_label(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()),
            "December 2023"
        );
    }

    #[test]
    fn test_unsorted_input_merges_into_first_occurrence() {
        let entries = vec![
            entry("a", "2023-06-01"),
            entry("b", "2023-05-01"),
            entry("c", "2023-06-20"),
        ];

        let groups = group_by_month(&entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "June 2023");
        assert_eq!(ids(&groups[0]), vec!["a", "c"]);
        assert_eq!(ids(&groups[1]), vec!["b"]);
    }

    #[test]
    fn test_grouping_preserves_total_count() {
        let entries: Vec<ChangelogEntry> = (1..=28)
            .map(|day| entry(&day.to_string(), &format!("2023-{:02}-{:02}", day % 12 + 1, day)))
            .collect();

        let groups = group_by_month(&entries);
        let total: usize = groups.iter().map(|g| g.entries.len()).sum();
        assert_eq!(total, entries.len());
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_month(&[]).is_empty());
    }
}
