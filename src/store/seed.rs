//! Demo release notes loaded when `CHANGELOG_SEED_DEMO` is enabled.

use chrono::NaiveDate;

use crate::models::{Category, ChangeType, ChangelogEntry, Reactions};

struct DemoEntry {
    id: &'static str,
    version: &'static str,
    date: (i32, u32, u32),
    title: &'static str,
    description: &'static str,
    change_type: ChangeType,
    category: Category,
    reactions: [u64; 4],
}

const DEMO_ENTRIES: &[DemoEntry] = &[
    DemoEntry {
        id: "1",
        version: "v1.2.0",
        date: (2023, 6, 15),
        title: "New Dashboard Layout",
        description: "We've completely redesigned the dashboard to make it more intuitive and user-friendly. The new layout provides better visibility of key metrics and improves navigation.",
        change_type: ChangeType::New,
        category: Category::Ui,
        reactions: [24, 18, 12, 5],
    },
    DemoEntry {
        id: "2",
        version: "v1.1.2",
        date: (2023, 6, 10),
        title: "Fixed Login Issues",
        description: "Resolved an issue where some users were experiencing login failures after the recent update. This fix ensures a smooth login experience for all users.",
        change_type: ChangeType::Fix,
        category: Category::Security,
        reactions: [15, 7, 3, 2],
    },
    DemoEntry {
        id: "3",
        version: "v1.1.1",
        date: (2023, 6, 5),
        title: "Performance Improvements",
        description: "Optimized database queries and reduced page load times by 40%. The application should now feel much more responsive, especially on slower connections.",
        change_type: ChangeType::Improvement,
        category: Category::Performance,
        reactions: [32, 14, 8, 3],
    },
    DemoEntry {
        id: "4",
        version: "v1.1.0",
        date: (2023, 5, 28),
        title: "Added Export Functionality",
        description: "You can now export your data in CSV and PDF formats. Look for the new export button in the top right corner of your reports.",
        change_type: ChangeType::New,
        category: Category::Feature,
        reactions: [45, 22, 18, 7],
    },
    DemoEntry {
        id: "5",
        version: "v1.0.2",
        date: (2023, 5, 20),
        title: "API Rate Limiting Improvements",
        description: "We've improved our API rate limiting to better handle traffic spikes. This should result in more consistent performance during high-traffic periods.",
        change_type: ChangeType::Improvement,
        category: Category::Api,
        reactions: [19, 5, 2, 8],
    },
];

pub(super) fn demo_entries() -> Vec<ChangelogEntry> {
    DEMO_ENTRIES
        .iter()
        .filter_map(|demo| {
            let (year, month, day) = demo.date;
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            Some(ChangelogEntry {
                id: demo.id.to_string(),
                version: demo.version.to_string(),
                date,
                title: demo.title.to_string(),
                description: demo.description.to_string(),
                change_type: demo.change_type,
                category: demo.category,
                reactions: Reactions::with_counts(demo.reactions),
            })
        })
        .collect()
}
