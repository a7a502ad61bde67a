//! Revision information for change detection.

use serde::{Deserialize, Serialize};

/// Counter bumped by every store mutation, with the time of the last bump.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: u64,
    pub generated_at: String,
}
