//! Timeline and revision API endpoints.

use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::models::{ChangelogEntry, RevisionInfo};
use crate::timeline::{group_by_month, TimelineGroup};
use crate::AppState;

/// Entry as rendered on the public timeline, with its badge text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntryResponse {
    #[serde(flatten)]
    pub entry: ChangelogEntry,
    pub type_emoji: &'static str,
    pub type_label: &'static str,
    pub category_label: &'static str,
}

impl From<ChangelogEntry> for TimelineEntryResponse {
    fn from(entry: ChangelogEntry) -> Self {
        Self {
            type_emoji: entry.change_type.emoji(),
            type_label: entry.change_type.label(),
            category_label: entry.category.label(),
            entry,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineGroupResponse {
    pub label: String,
    pub entries: Vec<TimelineEntryResponse>,
}

impl From<TimelineGroup> for TimelineGroupResponse {
    fn from(group: TimelineGroup) -> Self {
        Self {
            label: group.label,
            entries: group.entries.into_iter().map(Into::into).collect(),
        }
    }
}

/// GET /api/timeline - Entries grouped by calendar month, newest first.
pub async fn get_timeline(
    State(state): State<AppState>,
) -> ApiResult<Vec<TimelineGroupResponse>> {
    let revision_id = state.store.revision().await.revision_id;
    let entries = state.store.list().await;
    let groups = group_by_month(&entries).into_iter().map(Into::into).collect();
    success(groups, revision_id)
}

/// GET /api/revision - Get the current revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let revision_info = state.store.revision().await;
    let revision_id = revision_info.revision_id;
    success(revision_info, revision_id)
}
