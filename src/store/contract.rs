//! The operation contract any changelog backend must satisfy.
//!
//! Projections ([`crate::admin::AdminWorkflow`], [`crate::timeline::TimelineView`])
//! are written against this trait so the in-memory [`EntryStore`] can be swapped
//! for a network-backed client that may fail with [`AppError::Unavailable`].

use crate::errors::AppError;
use crate::models::{
    ChangelogEntry, CreateEntryRequest, ReactionKind, RevisionInfo, UpdateEntryRequest,
};

use super::EntryStore;

#[allow(async_fn_in_trait)]
pub trait ChangelogApi {
    /// Entries sorted by date, most recent first.
    async fn list_entries(&self) -> Result<Vec<ChangelogEntry>, AppError>;

    async fn get_entry(&self, id: &str) -> Result<Option<ChangelogEntry>, AppError>;

    async fn create_entry(&self, request: &CreateEntryRequest) -> Result<ChangelogEntry, AppError>;

    async fn update_entry(
        &self,
        id: &str,
        request: &UpdateEntryRequest,
    ) -> Result<Option<ChangelogEntry>, AppError>;

    /// `Ok(false)` when nothing was removed.
    async fn delete_entry(&self, id: &str) -> Result<bool, AppError>;

    async fn react_to_entry(
        &self,
        id: &str,
        kind: ReactionKind,
    ) -> Result<Option<ChangelogEntry>, AppError>;

    async fn current_revision(&self) -> Result<RevisionInfo, AppError>;
}

impl ChangelogApi for EntryStore {
    async fn list_entries(&self) -> Result<Vec<ChangelogEntry>, AppError> {
        Ok(self.list().await)
    }

    async fn get_entry(&self, id: &str) -> Result<Option<ChangelogEntry>, AppError> {
        Ok(self.get(id).await)
    }

    async fn create_entry(&self, request: &CreateEntryRequest) -> Result<ChangelogEntry, AppError> {
        Ok(self.create(request).await)
    }

    async fn update_entry(
        &self,
        id: &str,
        request: &UpdateEntryRequest,
    ) -> Result<Option<ChangelogEntry>, AppError> {
        Ok(self.update(id, request).await)
    }

    async fn delete_entry(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.delete(id).await)
    }

    async fn react_to_entry(
        &self,
        id: &str,
        kind: ReactionKind,
    ) -> Result<Option<ChangelogEntry>, AppError> {
        Ok(self.add_reaction(id, kind).await)
    }

    async fn current_revision(&self) -> Result<RevisionInfo, AppError> {
        Ok(self.revision().await)
    }
}

/// Backend whose every call fails, for exercising transport-failure paths.
#[cfg(test)]
pub(crate) struct UnreachableApi;

#[cfg(test)]
impl ChangelogApi for UnreachableApi {
    async fn list_entries(&self) -> Result<Vec<ChangelogEntry>, AppError> {
        Err(unreachable_error())
    }

    async fn get_entry(&self, _id: &str) -> Result<Option<ChangelogEntry>, AppError> {
        Err(unreachable_error())
    }

    async fn create_entry(&self, _request: &CreateEntryRequest) -> Result<ChangelogEntry, AppError> {
        Err(unreachable_error())
    }

    async fn update_entry(
        &self,
        _id: &str,
        _request: &UpdateEntryRequest,
    ) -> Result<Option<ChangelogEntry>, AppError> {
        Err(unreachable_error())
    }

    async fn delete_entry(&self, _id: &str) -> Result<bool, AppError> {
        Err(unreachable_error())
    }

    async fn react_to_entry(
        &self,
        _id: &str,
        _kind: ReactionKind,
    ) -> Result<Option<ChangelogEntry>, AppError> {
        Err(unreachable_error())
    }

    async fn current_revision(&self) -> Result<RevisionInfo, AppError> {
        Err(unreachable_error())
    }
}

#[cfg(test)]
fn unreachable_error() -> AppError {
    AppError::Unavailable("changelog API unreachable".to_string())
}

/// Backend that still serves reads while every write and revision lookup fails.
#[cfg(test)]
pub(crate) struct ReadOnlyApi(pub EntryStore);

#[cfg(test)]
impl ChangelogApi for ReadOnlyApi {
    async fn list_entries(&self) -> Result<Vec<ChangelogEntry>, AppError> {
        Ok(self.0.list().await)
    }

    async fn get_entry(&self, id: &str) -> Result<Option<ChangelogEntry>, AppError> {
        Ok(self.0.get(id).await)
    }

    async fn create_entry(&self, _request: &CreateEntryRequest) -> Result<ChangelogEntry, AppError> {
        Err(unreachable_error())
    }

    async fn update_entry(
        &self,
        _id: &str,
        _request: &UpdateEntryRequest,
    ) -> Result<Option<ChangelogEntry>, AppError> {
        Err(unreachable_error())
    }

    async fn delete_entry(&self, _id: &str) -> Result<bool, AppError> {
        Err(unreachable_error())
    }

    async fn react_to_entry(
        &self,
        _id: &str,
        _kind: ReactionKind,
    ) -> Result<Option<ChangelogEntry>, AppError> {
        Err(unreachable_error())
    }

    async fn current_revision(&self) -> Result<RevisionInfo, AppError> {
        Err(unreachable_error())
    }
}
