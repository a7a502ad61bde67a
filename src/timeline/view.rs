//! Public changelog page projection.
//!
//! Holds the loaded entry list, merges reaction results into it by id, and
//! tracks whether the page shows entries, an empty notice, or an error.

use std::sync::Arc;

use super::{group_by_month, TimelineGroup};
use crate::models::{ChangelogEntry, ReactionKind};
use crate::notice::Notice;
use crate::store::ChangelogApi;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load changelog entries";
pub const REACTION_FAILED_MESSAGE: &str = "Failed to add reaction";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineState {
    Loading,
    Empty,
    Ready,
    /// The list could not be fetched; no stale entries are shown.
    Failed(String),
}

pub struct TimelineView<S> {
    api: Arc<S>,
    entries: Vec<ChangelogEntry>,
    state: TimelineState,
}

impl<S: ChangelogApi> TimelineView<S> {
    pub fn new(api: Arc<S>) -> Self {
        Self {
            api,
            entries: Vec::new(),
            state: TimelineState::Loading,
        }
    }

    pub async fn load(&mut self) {
        match self.api.list_entries().await {
            Ok(entries) => {
                self.state = if entries.is_empty() {
                    TimelineState::Empty
                } else {
                    TimelineState::Ready
                };
                self.entries = entries;
            }
            Err(e) => {
                tracing::error!("Failed to load changelog entries: {}", e);
                self.entries.clear();
                self.state = TimelineState::Failed(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    pub fn entries(&self) -> &[ChangelogEntry] {
        &self.entries
    }

    pub fn groups(&self) -> Vec<TimelineGroup> {
        group_by_month(&self.entries)
    }

    /// React once per kind. A kind already reacted locally is left alone,
    /// as is an entry this view does not hold. Returns a notice on failure.
    pub async fn react(&mut self, id: &str, kind: ReactionKind) -> Option<Notice> {
        let entry = self.entries.iter().find(|entry| entry.id == id)?;
        if entry.reactions.get(kind).user_reacted {
            return None;
        }

        match self.api.react_to_entry(id, kind).await {
            Ok(Some(updated)) => {
                if let Some(slot) = self.entries.iter_mut().find(|e| e.id == updated.id) {
                    *slot = updated;
                }
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Failed to add reaction to {}: {}", id, e);
                Some(Notice::error(REACTION_FAILED_MESSAGE))
            }
        }
    }
}
