//! In-memory entry store for CRUD and reaction operations.
//!
//! The store owns the only copy of the collection. Callers get clones.

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{
    ChangelogEntry, CreateEntryRequest, ReactionKind, Reactions, RevisionInfo, UpdateEntryRequest,
};

/// Collection plus revision bookkeeping, guarded by one lock.
struct StoreState {
    entries: Vec<ChangelogEntry>,
    revision_id: u64,
    generated_at: String,
}

impl StoreState {
    /// Increment the revision and return the new value.
    fn bump_revision(&mut self) -> u64 {
        self.revision_id += 1;
        self.generated_at = Utc::now().to_rfc3339();
        self.revision_id
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let candidate = uuid::Uuid::new_v4().to_string();
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

/// Result of a mutation together with the revision it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revised<T> {
    pub value: T,
    pub revision_id: u64,
}

/// Sole owner of changelog entries and their reactions.
pub struct EntryStore {
    state: RwLock<StoreState>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    /// Start from an existing collection, kept in the given insertion order.
    pub fn with_entries(entries: Vec<ChangelogEntry>) -> Self {
        Self {
            state: RwLock::new(StoreState {
                entries,
                revision_id: 0,
                generated_at: Utc::now().to_rfc3339(),
            }),
        }
    }

    /// Store pre-filled with the demo release notes.
    pub fn with_demo_entries() -> Self {
        Self::with_entries(super::seed::demo_entries())
    }

    /// All entries, most recent date first. Equal dates keep insertion order.
    pub async fn list(&self) -> Vec<ChangelogEntry> {
        let state = self.state.read().await;
        let mut entries = state.entries.clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn get(&self, id: &str) -> Option<ChangelogEntry> {
        let state = self.state.read().await;
        state.entries.iter().find(|entry| entry.id == id).cloned()
    }

    /// Append a new entry with a fresh id and zeroed reactions. Does not validate.
    pub async fn create(&self, request: &CreateEntryRequest) -> ChangelogEntry {
        self.create_revised(request).await.value
    }

    pub async fn create_revised(&self, request: &CreateEntryRequest) -> Revised<ChangelogEntry> {
        let mut state = self.state.write().await;

        let entry = ChangelogEntry {
            id: state.fresh_id(),
            version: request.version.clone(),
            date: request.date,
            title: request.title.clone(),
            description: request.description.clone(),
            change_type: request.change_type,
            category: request.category,
            reactions: Reactions::zeroed(),
        };

        state.entries.push(entry.clone());
        let revision_id = state.bump_revision();
        tracing::debug!(
            id = %entry.id,
            version = %entry.version,
            change_type = entry.change_type.as_str(),
            category = entry.category.as_str(),
            "Created changelog entry"
        );

        Revised {
            value: entry,
            revision_id,
        }
    }

    /// Merge the supplied fields. `id` and `reactions` are never touched.
    pub async fn update(&self, id: &str, request: &UpdateEntryRequest) -> Option<ChangelogEntry> {
        self.update_revised(id, request).await.map(|r| r.value)
    }

    pub async fn update_revised(
        &self,
        id: &str,
        request: &UpdateEntryRequest,
    ) -> Option<Revised<ChangelogEntry>> {
        let mut state = self.state.write().await;
        let index = state.position(id)?;

        request.apply_to(&mut state.entries[index]);
        let updated = state.entries[index].clone();

        let revision_id = state.bump_revision();
        tracing::debug!(id, "Updated changelog entry");

        Some(Revised {
            value: updated,
            revision_id,
        })
    }

    /// Returns whether an entry was removed.
    pub async fn delete(&self, id: &str) -> bool {
        self.delete_revised(id).await.is_some()
    }

    /// Remove an entry, handing back the removed entry.
    pub async fn delete_revised(&self, id: &str) -> Option<Revised<ChangelogEntry>> {
        let mut state = self.state.write().await;
        let index = state.position(id)?;

        let removed = state.entries.remove(index);
        let revision_id = state.bump_revision();
        tracing::debug!(id, "Deleted changelog entry");

        Some(Revised {
            value: removed,
            revision_id,
        })
    }

    /// Increment one reaction counter. Repeating the call increments again.
    pub async fn add_reaction(&self, id: &str, kind: ReactionKind) -> Option<ChangelogEntry> {
        self.add_reaction_revised(id, kind).await.map(|r| r.value)
    }

    pub async fn add_reaction_revised(
        &self,
        id: &str,
        kind: ReactionKind,
    ) -> Option<Revised<ChangelogEntry>> {
        let mut state = self.state.write().await;
        let index = state.position(id)?;

        state.entries[index].reactions.record(kind);
        let updated = state.entries[index].clone();

        let revision_id = state.bump_revision();
        tracing::debug!(id, reaction = kind.as_str(), "Recorded reaction");

        Some(Revised {
            value: updated,
            revision_id,
        })
    }

    pub async fn revision(&self) -> RevisionInfo {
        let state = self.state.read().await;
        RevisionInfo {
            revision_id: state.revision_id,
            generated_at: state.generated_at.clone(),
        }
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}
