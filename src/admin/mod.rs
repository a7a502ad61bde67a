//! Admin dashboard workflow.
//!
//! # Responsibility
//! - Gate access on the caller-supplied authentication flags.
//! - Run create/update/delete against a [`ChangelogApi`] backend.
//! - Keep a client-side projection of the entry list in step with the
//!   results, without re-fetching.
//!
//! # Invariants
//! - Created entries are prepended; nothing is re-sorted.
//! - Updated entries are replaced in place, even when their date moved.
//! - A failed or missed operation leaves the projection untouched.
//!
//! The projection can drift from the backend when other writers exist.
//! [`AdminWorkflow::has_drifted`] reports it; nothing reconciles it.

use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{ChangelogEntry, CreateEntryRequest, UpdateEntryRequest};
use crate::notice::Notice;
use crate::store::ChangelogApi;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Authentication flags supplied by the external identity provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminAccess {
    pub is_authenticated: bool,
    pub is_admin: bool,
}

impl AdminAccess {
    pub fn admin() -> Self {
        Self {
            is_authenticated: true,
            is_admin: true,
        }
    }

    pub fn permits(&self) -> bool {
        self.is_authenticated && self.is_admin
    }
}

pub struct AdminWorkflow<S> {
    api: Arc<S>,
    entries: Vec<ChangelogEntry>,
    observed_revision: Option<u64>,
}

impl<S: ChangelogApi> AdminWorkflow<S> {
    /// Enter the dashboard. Fails with `Unauthorized` unless the caller is an
    /// authenticated admin. The projection starts empty until [`Self::load`].
    pub fn open(api: Arc<S>, access: AdminAccess) -> Result<Self, AppError> {
        if !access.permits() {
            return Err(AppError::Unauthorized(
                "Admin access requires an authenticated administrator".to_string(),
            ));
        }

        Ok(Self {
            api,
            entries: Vec::new(),
            observed_revision: None,
        })
    }

    /// Fetch the list into the projection.
    pub async fn load(&mut self) -> Option<Notice> {
        match self.api.list_entries().await {
            Ok(entries) => {
                self.entries = entries;
                self.observed_revision = match self.api.current_revision().await {
                    Ok(info) => Some(info.revision_id),
                    Err(e) => {
                        tracing::warn!("Failed to read changelog revision: {}", e);
                        None
                    }
                };
                None
            }
            Err(e) => {
                tracing::error!("Failed to load changelog entries: {}", e);
                Some(Notice::error("Failed to load changelog entries"))
            }
        }
    }

    pub fn entries(&self) -> &[ChangelogEntry] {
        &self.entries
    }

    pub async fn create(&mut self, fields: &CreateEntryRequest) -> Notice {
        if fields.validate().is_err() {
            return Notice::error(REQUIRED_FIELDS_MESSAGE);
        }

        match self.api.create_entry(fields).await {
            Ok(entry) => {
                self.entries.insert(0, entry);
                self.record_own_mutation();
                Notice::success("Changelog entry created successfully")
            }
            Err(e) => {
                tracing::error!("Failed to create changelog entry: {}", e);
                Notice::error("Failed to create changelog entry")
            }
        }
    }

    /// Returns `None` when the entry no longer exists; the projection is left as is.
    pub async fn update(&mut self, id: &str, fields: &UpdateEntryRequest) -> Option<Notice> {
        if fields.validate().is_err() {
            return Some(Notice::error(REQUIRED_FIELDS_MESSAGE));
        }

        match self.api.update_entry(id, fields).await {
            Ok(Some(updated)) => {
                if let Some(slot) = self.entries.iter_mut().find(|e| e.id == updated.id) {
                    *slot = updated;
                }
                self.record_own_mutation();
                Some(Notice::success("Changelog entry updated successfully"))
            }
            Ok(None) => {
                tracing::warn!("Changelog entry {} vanished before update", id);
                None
            }
            Err(e) => {
                tracing::error!("Failed to update changelog entry {}: {}", id, e);
                Some(Notice::error("Failed to update changelog entry"))
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> Notice {
        match self.api.delete_entry(id).await {
            Ok(true) => {
                self.entries.retain(|entry| entry.id != id);
                self.record_own_mutation();
                Notice::success("Changelog entry deleted successfully")
            }
            Ok(false) => Notice::error("Failed to delete changelog entry"),
            Err(e) => {
                tracing::error!("Failed to delete changelog entry {}: {}", id, e);
                Notice::error("Failed to delete changelog entry")
            }
        }
    }

    /// Whether the backend saw mutations this projection did not make.
    pub async fn has_drifted(&self) -> Result<bool, AppError> {
        let current = self.api.current_revision().await?;
        Ok(self.observed_revision != Some(current.revision_id))
    }

    // Each successful create/update/delete bumps the backend revision by one.
    fn record_own_mutation(&mut self) {
        if let Some(revision) = self.observed_revision.as_mut() {
            *revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Category, ChangeType, ReactionKind};
    use crate::notice::NoticeLevel;
    use crate::store::{EntryStore, ReadOnlyApi, UnreachableApi};

    fn fields(version: &str, date: (i32, u32, u32), title: &str) -> CreateEntryRequest {
        CreateEntryRequest {
            version: version.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            title: title.to_string(),
            description: "Details".to_string(),
            change_type: ChangeType::Improvement,
            category: Category::Performance,
        }
    }

    async fn open_loaded(store: Arc<EntryStore>) -> AdminWorkflow<EntryStore> {
        let mut workflow = AdminWorkflow::open(store, AdminAccess::admin()).unwrap();
        assert!(workflow.load().await.is_none());
        workflow
    }

    #[test]
    fn test_open_requires_authenticated_admin() {
        let store = Arc::new(EntryStore::new());

        let denied = [
            AdminAccess::default(),
            AdminAccess {
                is_authenticated: true,
                is_admin: false,
            },
            AdminAccess {
                is_authenticated: false,
                is_admin: true,
            },
        ];
        for access in denied {
            let result = AdminWorkflow::open(store.clone(), access);
            assert!(matches!(result, Err(AppError::Unauthorized(_))));
        }

        assert!(AdminWorkflow::open(store, AdminAccess::admin()).is_ok());
    }

    #[tokio::test]
    async fn test_create_prepends_without_sorting() {
        let store = Arc::new(EntryStore::with_demo_entries());
        let mut workflow = open_loaded(store.clone()).await;
        let before = workflow.entries().len();

        // Older than every demo entry, still shown first.
        let notice = workflow.create(&fields("v0.9.0", (2020, 1, 1), "Old")).await;

        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Changelog entry created successfully");
        assert_eq!(workflow.entries().len(), before + 1);
        assert_eq!(workflow.entries()[0].title, "Old");
        assert_eq!(store.len().await, before + 1);
        assert_ne!(store.list().await[0].title, "Old");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields_before_store() {
        let store = Arc::new(EntryStore::new());
        let mut workflow = open_loaded(store.clone()).await;

        let notice = workflow.create(&fields("  ", (2023, 7, 1), "Title")).await;

        assert!(notice.is_error());
        assert_eq!(notice.message, REQUIRED_FIELDS_MESSAGE);
        assert!(store.is_empty().await);
        assert!(workflow.entries().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place_even_if_date_moves() {
        let store = Arc::new(EntryStore::with_demo_entries());
        let mut workflow = open_loaded(store.clone()).await;
        let last = workflow.entries().last().cloned().unwrap();
        let order_before: Vec<String> = workflow.entries().iter().map(|e| e.id.clone()).collect();

        let patch = UpdateEntryRequest {
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            title: Some("Moved".to_string()),
            ..Default::default()
        };
        let notice = workflow.update(&last.id, &patch).await.unwrap();

        assert_eq!(notice.message, "Changelog entry updated successfully");
        let order_after: Vec<String> = workflow.entries().iter().map(|e| e.id.clone()).collect();
        assert_eq!(order_before, order_after);
        assert_eq!(workflow.entries().last().unwrap().title, "Moved");

        // The store itself now sorts it first.
        assert_eq!(store.list().await[0].id, last.id);
    }

    #[tokio::test]
    async fn test_update_missing_entry_is_silent() {
        let store = Arc::new(EntryStore::with_demo_entries());
        let mut workflow = open_loaded(store).await;
        let before = workflow.entries().to_vec();

        let patch = UpdateEntryRequest {
            title: Some("Nope".to_string()),
            ..Default::default()
        };
        assert!(workflow.update("missing", &patch).await.is_none());
        assert_eq!(workflow.entries(), before.as_slice());
    }

    #[tokio::test]
    async fn test_update_full_form_keeps_reactions() {
        let store = Arc::new(EntryStore::new());
        let created = store.create(&fields("v1", (2023, 5, 1), "A")).await;
        store.add_reaction(&created.id, ReactionKind::Heart).await;

        let mut workflow = open_loaded(store.clone()).await;
        let patch = UpdateEntryRequest::from(fields("v2", (2023, 5, 2), "B"));
        workflow.update(&created.id, &patch).await.unwrap();

        let local = &workflow.entries()[0];
        assert_eq!(local.version, "v2");
        assert_eq!(local.reactions.get(ReactionKind::Heart).count, 1);
    }

    #[tokio::test]
    async fn test_delete_success_and_failure() {
        let store = Arc::new(EntryStore::with_demo_entries());
        let mut workflow = open_loaded(store.clone()).await;
        let target = workflow.entries()[1].id.clone();
        let before = workflow.entries().len();

        let notice = workflow.delete(&target).await;
        assert_eq!(notice.message, "Changelog entry deleted successfully");
        assert_eq!(workflow.entries().len(), before - 1);
        assert!(workflow.entries().iter().all(|e| e.id != target));

        let notice = workflow.delete(&target).await;
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to delete changelog entry");
        assert_eq!(workflow.entries().len(), before - 1);
    }

    #[tokio::test]
    async fn test_transport_failures_surface_notices() {
        let mut workflow = AdminWorkflow::open(Arc::new(UnreachableApi), AdminAccess::admin())
            .unwrap();

        let notice = workflow.load().await.unwrap();
        assert_eq!(notice.message, "Failed to load changelog entries");

        let notice = workflow.create(&fields("v1", (2023, 5, 1), "A")).await;
        assert_eq!(notice.message, "Failed to create changelog entry");

        let notice = workflow
            .update("x", &UpdateEntryRequest::default())
            .await
            .unwrap();
        assert_eq!(notice.message, "Failed to update changelog entry");

        let notice = workflow.delete("x").await;
        assert_eq!(notice.message, "Failed to delete changelog entry");

        assert!(workflow.entries().is_empty());
        assert!(workflow.has_drifted().await.is_err());
    }

    #[tokio::test]
    async fn test_load_survives_unavailable_revision() {
        let api = Arc::new(ReadOnlyApi(EntryStore::with_demo_entries()));
        let mut workflow = AdminWorkflow::open(api, AdminAccess::admin()).unwrap();

        assert!(workflow.load().await.is_none());
        assert_eq!(workflow.entries().len(), 5);
        assert_eq!(workflow.observed_revision, None);
        assert!(workflow.has_drifted().await.is_err());

        // Failed writes leave the loaded projection alone.
        let notice = workflow.delete("1").await;
        assert_eq!(notice.message, "Failed to delete changelog entry");
        assert_eq!(workflow.entries().len(), 5);
    }

    #[tokio::test]
    async fn test_drift_detection() {
        let store = Arc::new(EntryStore::with_demo_entries());
        let mut workflow = open_loaded(store.clone()).await;
        assert!(!workflow.has_drifted().await.unwrap());

        workflow.create(&fields("v2", (2023, 8, 1), "Own")).await;
        assert!(!workflow.has_drifted().await.unwrap());

        // A reaction from the public page is a mutation this projection did not make.
        store.add_reaction("1", ReactionKind::ThumbsUp).await;
        assert!(workflow.has_drifted().await.unwrap());
    }
}
